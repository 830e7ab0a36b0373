use std::path::Path;

use map::{MapController, MapElement, Physical};
use render::{FrameInput, Renderer, Surface, SvgSurface};

#[derive(Debug, Clone, Copy)]
pub struct ImageOptions {
    pub width: f64,
    pub height: f64,
    pub grid_interval: f64,
    pub crosshair: bool,
}

/// Element list as pretty JSON, in draw order.
pub fn snapshot_json(elements: &[MapElement]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(elements)
}

/// Fit the view to `elements` and paint one frame as SVG.
pub fn render_svg(elements: &[MapElement], opts: ImageOptions) -> String {
    let mut controller = MapController::new(Physical::new(opts.width, opts.height));
    controller.grid_interval = opts.grid_interval;
    controller.crosshair = opts.crosshair;
    controller.fit_to(elements);

    let frame = Renderer::collect(&FrameInput::from_controller(&controller, elements));
    let mut surface = SvgSurface::new();
    surface.paint(&frame);
    surface.into_document()
}

pub async fn write_snapshot(
    path: &Path,
    elements: &[MapElement],
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tokio::fs::write(path, snapshot_json(elements)?).await?;
    Ok(())
}

pub async fn write_svg(
    path: &Path,
    elements: &[MapElement],
    opts: ImageOptions,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tokio::fs::write(path, render_svg(elements, opts)).await?;
    Ok(())
}
