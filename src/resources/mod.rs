use crate::data_structures::texture::Texture;

/**
 * This module contains all logic for loading billboard textures from external files.
 */
pub mod texture;

/// Load one image file per texture-array layer and build the array.
///
/// Layer order follows `file_names`; a tree with `layer == i` samples
/// `file_names[i]`. The files are fetched concurrently.
pub async fn load_tree_texture_array(
    file_names: &[&str],
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Texture> {
    let loads = file_names.iter().map(|name| texture::load_binary(name));
    let results = futures::future::join_all(loads).await;

    let mut layers = Vec::with_capacity(file_names.len());
    for (result, name) in results.into_iter().zip(file_names) {
        let data = result?;
        let img = image::load_from_memory(&data)
            .map_err(|e| anyhow::anyhow!("could not decode billboard layer {}: {}", name, e))?;
        layers.push(img);
    }

    Texture::from_layers(device, queue, &layers, "tree billboard array")
}

/// Bundle a billboard texture array into the bind group the pipeline expects.
pub fn billboard_bind_group(
    device: &wgpu::Device,
    texture: &Texture,
) -> anyhow::Result<wgpu::BindGroup> {
    let sampler = texture
        .sampler
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("the billboard texture carries no sampler"))?;

    Ok(device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: &texture::billboard_texture_layout(device),
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some("billboard_bind_group"),
    }))
}
