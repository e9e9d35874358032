/// Acquire a headless device for GPU-backed tests.
///
/// No surface is involved, so the tests run on any adapter the host
/// exposes, including software rasterizers.
pub fn test_device() -> (wgpu::Device, wgpu::Queue) {
    let _ = env_logger::builder().is_test(true).try_init();

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::default(),
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .expect("no adapter available for integration tests");

    pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))
        .expect("failed to acquire a test device")
}
