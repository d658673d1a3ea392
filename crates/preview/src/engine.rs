//! Contract for the external typesetting engine.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::error::TypesetError;
use crate::overlay::SurfaceId;

/// A pinned, boxed future that is required to be Send and 'static.
pub type BoxFutureStatic<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Completion report for one typeset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesetOutcome {
	/// The text the engine was asked to render.
	pub text: String,
	/// Whether rendering succeeded.
	pub result: Result<(), TypesetError>,
}

impl TypesetOutcome {
	/// Reports a successful render of `text`.
	pub fn success(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			result: Ok(()),
		}
	}

	/// Reports a failed render of `text`.
	pub fn failure(text: impl Into<String>, error: TypesetError) -> Self {
		Self {
			text: text.into(),
			result: Err(error),
		}
	}
}

/// Converts markup into visual output inside an overlay surface.
///
/// The engine writes the surface directly. On error it restores its own last
/// valid output. The returned future resolves exactly once per call and
/// carries back the text it was given.
pub trait TypesetEngine: Send + Sync + 'static {
	/// Typesets `text` into `surface`.
	fn typeset(&self, surface: SurfaceId, text: String) -> BoxFutureStatic<TypesetOutcome>;
}

/// Adapts a closure into a [`TypesetEngine`].
pub struct FnTypesetEngine<F> {
	typeset: F,
}

impl<F> FnTypesetEngine<F>
where
	F: Fn(SurfaceId, String) -> BoxFutureStatic<TypesetOutcome> + Send + Sync + 'static,
{
	/// Wraps `typeset`.
	pub fn new(typeset: F) -> Self {
		Self { typeset }
	}
}

impl<F> TypesetEngine for FnTypesetEngine<F>
where
	F: Fn(SurfaceId, String) -> BoxFutureStatic<TypesetOutcome> + Send + Sync + 'static,
{
	fn typeset(&self, surface: SurfaceId, text: String) -> BoxFutureStatic<TypesetOutcome> {
		(self.typeset)(surface, text)
	}
}

impl<F> fmt::Debug for FnTypesetEngine<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnTypesetEngine").finish_non_exhaustive()
	}
}
