use quadview_common::{BackendChoice, ViewerConfig};
use quadview_render_wgpu::{SimpleScene, SurfaceTarget};
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no graphics adapter for backends {0:?}")]
    NoAdapter(wgpu::Backends),
    #[error("OpenGL was requested but the adapter uses {0:?}")]
    BackendMismatch(wgpu::Backend),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("scene setup failed: {0}")]
    Scene(#[from] quadview_render::SceneError),
}

pub fn backends_for(choice: BackendChoice) -> wgpu::Backends {
    match choice {
        BackendChoice::Gl => wgpu::Backends::GL,
        BackendChoice::Primary => wgpu::Backends::PRIMARY,
        BackendChoice::All => wgpu::Backends::all(),
    }
}

pub fn create_window(
    event_loop: &ActiveEventLoop,
    config: &ViewerConfig,
) -> Result<Arc<Window>, StartupError> {
    let attrs = Window::default_attributes()
        .with_title(config.window.title.clone())
        .with_inner_size(PhysicalSize::new(config.window.width, config.window.height))
        .with_resizable(true);
    Ok(Arc::new(event_loop.create_window(attrs)?))
}

/// Bring up the GPU context on `window` and wrap it in an uninitialized scene.
pub fn create_scene(
    window: Arc<Window>,
    config: &ViewerConfig,
) -> Result<SimpleScene, StartupError> {
    let backends = backends_for(config.renderer.backend);
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends,
        ..Default::default()
    });

    let size = window.inner_size();
    let surface = instance.create_surface(window)?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: Some(&surface),
        force_fallback_adapter: false,
    }))
    .ok_or(StartupError::NoAdapter(backends))?;

    let info = adapter.get_info();
    if config.renderer.backend == BackendChoice::Gl && info.backend != wgpu::Backend::Gl {
        return Err(StartupError::BackendMismatch(info.backend));
    }
    tracing::info!(
        backend = info.backend.to_str(),
        adapter = %info.name,
        driver = %info.driver_info,
        "graphics adapter selected"
    );

    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("quadview_device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                .using_resolution(adapter.limits()),
            memory_hints: Default::default(),
        },
        None,
    ))?;

    let target = SurfaceTarget::new(
        surface,
        &adapter,
        device,
        queue,
        size.width,
        size.height,
        config.window.vsync,
    )?;

    Ok(SimpleScene::new(target, size.width, size.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gl_choice_restricts_backends() {
        assert_eq!(backends_for(BackendChoice::Gl), wgpu::Backends::GL);
        assert!(backends_for(BackendChoice::All).contains(wgpu::Backends::GL));
        assert!(!backends_for(BackendChoice::Primary).contains(wgpu::Backends::GL));
    }
}
