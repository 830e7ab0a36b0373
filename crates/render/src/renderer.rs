use foundation::{Point, Region};
use map::{GridLine, MapController, MapElement, Orientation, Viewport, grid_lines};

use crate::style::{self, Color};

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Wipe the whole surface.
    Clear,
    Line {
        from: Point,
        to: Point,
        stroke: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
        stroke: Option<Color>,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
        stroke: Color,
    },
}

/// One full repaint, in physical coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<RenderCommand>,
}

/// The only drawing boundary.
pub trait Surface {
    fn paint(&mut self, frame: &RenderFrame);
}

/// Everything a repaint depends on.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub viewport: &'a Viewport,
    pub elements: &'a [MapElement],
    pub hovered: &'a [usize],
    /// Zero disables the grid.
    pub grid_interval: f64,
    pub crosshair: bool,
}

impl<'a> FrameInput<'a> {
    pub fn from_controller(controller: &'a MapController, elements: &'a [MapElement]) -> Self {
        Self {
            viewport: controller.viewport(),
            elements,
            hovered: controller.hovered(),
            grid_interval: controller.grid_interval,
            crosshair: controller.crosshair,
        }
    }
}

pub struct Renderer;

impl Renderer {
    /// Draw order: clear, crosshair, grid, then elements in list order so
    /// later elements sit on top.
    pub fn collect(input: &FrameInput<'_>) -> RenderFrame {
        let vp = input.viewport;
        let mut frame = RenderFrame {
            width: vp.physical.width,
            height: vp.physical.height,
            commands: vec![RenderCommand::Clear],
        };

        if input.crosshair {
            crosshair(vp, &mut frame.commands);
        }
        grid(vp, input.grid_interval, &mut frame.commands);

        for (i, element) in input.elements.iter().enumerate() {
            let hovered = input.hovered.contains(&i);
            element_commands(vp, element, hovered, &mut frame.commands);
        }
        frame
    }
}

fn crosshair(vp: &Viewport, out: &mut Vec<RenderCommand>) {
    let c = vp.physical.center();
    let half = style::CROSSHAIR_SIZE / 2.0;
    out.push(RenderCommand::Line {
        from: Point::new(c.x - half, c.y),
        to: Point::new(c.x + half, c.y),
        stroke: style::CROSSHAIR,
    });
    out.push(RenderCommand::Line {
        from: Point::new(c.x, c.y - half),
        to: Point::new(c.x, c.y + half),
        stroke: style::CROSSHAIR,
    });
}

fn grid(vp: &Viewport, interval: f64, out: &mut Vec<RenderCommand>) {
    let lines = grid_lines(vp, interval);
    let span = |l: &GridLine, stroke: Color| match l.orientation {
        Orientation::Vertical => RenderCommand::Line {
            from: Point::new(l.physical, 0.0),
            to: Point::new(l.physical, vp.physical.height),
            stroke,
        },
        Orientation::Horizontal => RenderCommand::Line {
            from: Point::new(0.0, l.physical),
            to: Point::new(vp.physical.width, l.physical),
            stroke,
        },
    };

    out.extend(lines.iter().map(|l| span(l, style::GRID)));
    // Axes are overdrawn so they stand out from the regular lines.
    out.extend(lines.iter().filter(|l| l.axis).map(|l| span(l, style::AXIS)));
}

fn element_commands(vp: &Viewport, element: &MapElement, hovered: bool, out: &mut Vec<RenderCommand>) {
    match element {
        MapElement::Point { point, point_type } => out.push(RenderCommand::Circle {
            center: vp.to_physical(*point),
            radius: if hovered {
                style::POINT_RADIUS_HOVER
            } else {
                style::POINT_RADIUS
            },
            fill: style::point_fill(*point_type, hovered),
            stroke: None,
        }),
        MapElement::Region {
            region,
            region_type,
        } => {
            let fill = style::region_fill(*region_type, hovered);
            let stroke = style::region_stroke(*region_type);
            match region {
                Region::Circle { center, radius } => out.push(RenderCommand::Circle {
                    center: vp.to_physical(*center),
                    radius: radius * vp.scale(),
                    fill,
                    stroke: Some(stroke),
                }),
                Region::Polygon { points } => out.push(RenderCommand::Polygon {
                    points: points.iter().map(|p| vp.to_physical(*p)).collect(),
                    fill,
                    stroke,
                }),
            }
        }
    }
}
