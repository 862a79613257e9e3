//! The wgpu backend of a [`Stage`](crate::stage::Stage).

use std::{iter, sync::Arc};

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    config::SceneConfig,
    context::Context,
    data_structures::{
        block::{Instanced, VoxelBlocks},
        grid::GroundLines,
        model::{DrawModel, Mesh},
        scene::VoxelScene,
    },
    resources::cube,
    stage::{Frame, RenderBackend},
};

/// Draws a voxel scene into a window surface.
#[derive(Debug)]
pub struct GpuRenderer {
    ctx: Context,
    cube: Mesh,
    blocks: Vec<VoxelBlocks>,
    ground: Option<GroundLines>,
    released: bool,
}

impl GpuRenderer {
    pub async fn new(window: Arc<Window>, config: &SceneConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window, config).await?;
        let cube = cube::load_cube(&ctx.device, config.voxel_size * config.cube_fill);
        Ok(Self {
            ctx,
            cube,
            blocks: Vec::new(),
            ground: None,
            released: false,
        })
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn blocks(&self) -> &[VoxelBlocks] {
        &self.blocks
    }

    fn instanced(&self) -> impl Iterator<Item = Instanced<'_>> {
        self.blocks.iter().map(|block| block.render(&self.cube))
    }
}

impl RenderBackend for GpuRenderer {
    fn load_scene(&mut self, scene: &mut VoxelScene) -> anyhow::Result<()> {
        for batch in scene.batches.iter_mut() {
            let block = VoxelBlocks::new(
                &self.ctx.device,
                &self.ctx.material_bind_group_layout,
                batch,
            )?;
            log::debug!("Uploaded {} voxels of {}", block.amount(), block.color);
            self.blocks.push(block);
        }
        if let Some(grid) = &scene.ground {
            let lines = GroundLines::new(&self.ctx.device, grid)?;
            log::debug!("Uploaded {} ground grid lines", grid.line_count());
            self.ground = Some(lines);
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
    }

    fn size(&self) -> (u32, u32) {
        (self.ctx.config.width, self.ctx.config.height)
    }

    fn draw(&mut self, frame: &Frame<'_>) -> anyhow::Result<()> {
        if self.released {
            return Ok(());
        }
        self.ctx
            .camera
            .write(&self.ctx.queue, frame.camera, frame.projection, frame.root);

        let output = match self.ctx.surface.get_current_texture() {
            Ok(output) => output,
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.ctx.window.inner_size();
                self.ctx.resize(size.width, size.height);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e).context("Unable to acquire the next frame"),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.ctx.depth_buffer.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // Until the reveal delay has passed only the background is shown.
            if frame.revealed {
                render_pass.set_pipeline(&self.ctx.pipeline);
                for basic in self.instanced() {
                    render_pass.set_vertex_buffer(1, basic.instance.slice(..));
                    render_pass.draw_mesh_instanced(
                        basic.mesh,
                        basic.material,
                        0..basic.amount as u32,
                        &self.ctx.camera.bind_group,
                        &self.ctx.light.bind_group,
                    );
                }

                // translucent, so after every opaque voxel
                if let Some(ground) = &self.ground {
                    render_pass.set_pipeline(&self.ctx.grid_pipeline);
                    render_pass.set_bind_group(0, &self.ctx.camera.bind_group, &[]);
                    render_pass.set_bind_group(1, &self.ctx.light.bind_group, &[]);
                    render_pass.set_vertex_buffer(0, ground.vertex_buffer.slice(..));
                    render_pass.draw(0..ground.vertex_count(), 0..1);
                }
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for block in self.blocks.drain(..) {
            block.destroy();
        }
        if let Some(ground) = self.ground.take() {
            ground.destroy();
        }
        self.cube.destroy();
        self.ctx.camera.buffer.destroy();
        self.ctx.light.buffer.destroy();
        self.ctx.depth_buffer.destroy();
        log::debug!("GPU resources released");
    }
}
