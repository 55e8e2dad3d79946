use std::{path::Path, sync::mpsc};

use image::{ImageBuffer, Rgba};
use vello::wgpu;

use crate::{
  Error,
  render::{GpuHandle, RenderConfig},
};

/// Copies the rendered texture back to the CPU and writes it to `path`.
pub(crate) fn write_image(
  handle: &GpuHandle,
  config: &RenderConfig,
  path: &Path,
) -> Result<(), Error> {
  let buffer = handle.device.create_buffer(&wgpu::BufferDescriptor {
    label:              Some("Output Buffer"),
    size:               (4 * config.width * config.height) as u64,
    usage:              wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
    mapped_at_creation: false,
  });

  let mut encoder = handle.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
    label: Some("texture_buffer_copy_encoder"),
  });

  encoder.copy_texture_to_buffer(
    wgpu::TexelCopyTextureInfo {
      texture:   &handle.texture,
      mip_level: 0,
      origin:    wgpu::Origin3d::ZERO,
      aspect:    wgpu::TextureAspect::All,
    },
    wgpu::TexelCopyBufferInfo {
      buffer: &buffer,
      layout: wgpu::TexelCopyBufferLayout {
        offset:         0,
        bytes_per_row:  Some(4 * config.width),
        rows_per_image: Some(config.height),
      },
    },
    config.extent_3d(),
  );

  handle.queue.submit(std::iter::once(encoder.finish()));

  let slice = buffer.slice(..);
  let (sender, receiver) = mpsc::channel();
  slice.map_async(wgpu::MapMode::Read, move |result| {
    let _ = sender.send(result);
  });
  handle.device.poll(wgpu::PollType::Wait).map_err(Error::gpu)?;
  receiver.recv().map_err(Error::gpu)?.map_err(Error::gpu)?;

  let data = slice.get_mapped_range().to_vec();
  buffer.unmap();

  let image = ImageBuffer::<Rgba<u8>, _>::from_raw(config.width, config.height, data)
    .ok_or_else(|| Error::Gpu("readback buffer is smaller than the canvas".to_string()))?;
  image.save(path)?;

  tracing::info!(
    path = %path.display(),
    width = config.width,
    height = config.height,
    "saved sheet"
  );
  Ok(())
}
