use wgpu::{Device, Extent3d, Queue, Sampler, Texture, TextureView};

use crate::palette::Rgba;

/// One-pixel-per-cell texture the CPU-rendered frame is uploaded into
/// each generation. Sampled with nearest filtering so cells stay crisp
/// at any window size.
pub struct FrameTexture {
    texture: Texture,
    pub view: TextureView,
    pub sampler: Sampler,
    extent: Extent3d,
}

impl FrameTexture {
    pub fn new(device: &Device, width: u32, height: u32) -> Self {
        let extent = Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("cell-frame-texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("cell-frame-sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            extent,
        }
    }

    /// Upload one color per cell. The slice length must match the
    /// texture dimensions.
    pub fn upload(&self, queue: &Queue, pixels: &[Rgba]) {
        assert_eq!(
            pixels.len(),
            (self.extent.width * self.extent.height) as usize,
            "pixel data size mismatch"
        );

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(pixels),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.extent.width),
                rows_per_image: Some(self.extent.height),
            },
            self.extent,
        );
    }
}
