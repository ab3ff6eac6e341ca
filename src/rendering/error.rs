//! Renderer setup errors and per-frame surface error handling.

use thiserror::Error;

/// Failure while bringing up the GPU
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find a suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported {0}")]
    UnsupportedSurface(&'static str),
}

/// What the frame loop should do after a surface error
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Reconfigure the surface; rendering resumes next frame
    Reconfigure,
    /// Transient error; skip the current frame
    SkipFrame,
    /// Unrecoverable (out of memory); shut down
    Fatal,
}

impl From<&wgpu::SurfaceError> for SurfaceErrorAction {
    fn from(error: &wgpu::SurfaceError) -> Self {
        match error {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigure,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            // Timeout and anything newer the backend reports
            _ => Self::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_classification() {
        assert_eq!(
            SurfaceErrorAction::from(&wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigure
        );
        assert_eq!(
            SurfaceErrorAction::from(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigure
        );
        assert_eq!(
            SurfaceErrorAction::from(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            SurfaceErrorAction::from(&wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
    }
}
