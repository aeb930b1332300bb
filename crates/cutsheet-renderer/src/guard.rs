use std::ops::{Deref, DerefMut};

use crate::context::DrawingContext;

/// Scoped graphics state: `save()` on creation, `restore()` on drop.
///
/// Whatever happens between the two (early return, `?`, panic unwinding),
/// transforms and styles set through the guard are undone when it goes out
/// of scope.
pub struct StateGuard<'a, C: DrawingContext + ?Sized> {
    ctx: &'a mut C,
}

impl<'a, C: DrawingContext + ?Sized> StateGuard<'a, C> {
    pub fn new(ctx: &'a mut C) -> Self {
        ctx.save();
        Self { ctx }
    }
}

impl<C: DrawingContext + ?Sized> Deref for StateGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &*self.ctx
    }
}

impl<C: DrawingContext + ?Sized> DerefMut for StateGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut *self.ctx
    }
}

impl<C: DrawingContext + ?Sized> Drop for StateGuard<'_, C> {
    fn drop(&mut self) {
        if let Err(e) = self.ctx.restore() {
            log::error!("Failed to restore graphics state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderError;
    use crate::recording::{DrawCommand, RecordingContext};

    fn draw_and_fail(ctx: &mut RecordingContext) -> Result<(), RenderError> {
        let mut scoped = StateGuard::new(ctx);
        scoped.translate(10.0, 10.0)?;
        Err(RenderError::Backend("boom".to_string()))
    }

    #[test]
    fn test_restores_on_scope_exit() {
        let mut ctx = RecordingContext::default();
        {
            let mut scoped = StateGuard::new(&mut ctx);
            scoped.translate(5.0, 5.0).unwrap();
            assert_eq!(scoped.depth(), 1);
        }
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.transform().is_identity());
        assert_eq!(ctx.commands().first(), Some(&DrawCommand::Save));
        assert_eq!(ctx.commands().last(), Some(&DrawCommand::Restore));
    }

    #[test]
    fn test_restores_on_error_path() {
        let mut ctx = RecordingContext::default();
        assert!(draw_and_fail(&mut ctx).is_err());
        assert_eq!(ctx.depth(), 0);
        assert!(ctx.transform().is_identity());
    }
}
