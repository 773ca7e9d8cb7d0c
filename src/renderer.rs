use crate::color::{Color, pack_rgb};
use crate::geometry::Point;
use crate::scene::Frame;

const LIGHT_RADIUS: f32 = 5.0;
const RAY_STUB: f32 = 5.0;

pub fn render_frame(buf: &mut [u32], width: usize, height: usize, frame: &Frame) {
    if width == 0 || height == 0 || buf.len() < width * height {
        return;
    }

    // Clear background
    let background = pack_rgb(16, 16, 20);
    buf[..width * height].fill(background);

    for light in &frame.lights {
        // Visibility fan; rays without a hit are skipped
        for (_, hit) in &light.fan {
            if let Some(p) = hit {
                draw_line(buf, width, height, light.pos, *p, light.color);
            }
        }

        for (ray, _) in &light.fan {
            let tip = light.pos + ray.dir * RAY_STUB;
            draw_line(buf, width, height, light.pos, tip, light.ray_color);
        }

        fill_circle(buf, width, height, light.pos, LIGHT_RADIUS, light.color);
        if light.active {
            fill_circle(buf, width, height, light.pos, 1.5, light.ray_color);
        }
    }

    for &(segment, color) in &frame.boundaries {
        draw_line(buf, width, height, segment.a, segment.b, color);
    }
}

#[inline]
fn lerp_color_u32(a: u32, b: u32, w256: u32) -> u32 {
    // w256 in [0, 256]; inv = 256 - w256
    let inv = 256 - w256;
    // Interpolate R and B together (00RR00BB), with mask 0x00FF00FF,
    let rb = ((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w256) >> 8 & 0x00FF00FF;
    // Interpolate G separately (0000GG00), with mask 0x0000FF00
    let g = ((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w256) >> 8 & 0x0000FF00;
    rb | g
}

#[inline]
fn alpha_weight(alpha: f32) -> u32 {
    if alpha <= 0.0 {
        return 0;
    }
    // fixed-point 8.8, any visible alpha moves the pixel
    ((alpha * 256.0).round() as u32).clamp(1, 256)
}

#[inline]
fn blend(buf: &mut [u32], idx: usize, src: u32, w256: u32) {
    buf[idx] = lerp_color_u32(buf[idx], src, w256);
}

/// Alpha-blended DDA line, clipped to the buffer.
fn draw_line(buf: &mut [u32], width: usize, height: usize, a: Point, b: Point, color: Color) {
    let w256 = alpha_weight(color.a);
    if w256 == 0 {
        return;
    }
    let (mut p0, mut p1) = (a, b);
    if !clip_line_rect(&mut p0, &mut p1, width as f32, height as f32) {
        return;
    }

    let src = color.pack();
    let d = p1 - p0;
    let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as usize;
    let inc = d * (1.0 / steps as f32);

    // Clipped points may sit on the far edge; pin them to the last pixel.
    let mut p = p0;
    for _ in 0..=steps {
        let x = (p.x.max(0.0) as usize).min(width - 1);
        let y = (p.y.max(0.0) as usize).min(height - 1);
        blend(buf, y * width + x, src, w256);
        p = p + inc;
    }
}

fn fill_circle(buf: &mut [u32], width: usize, height: usize, c: Point, r: f32, color: Color) {
    let w256 = alpha_weight(color.a);
    if w256 == 0 || !(c.x.is_finite() && c.y.is_finite()) {
        return;
    }
    let src = color.pack();
    let x0 = (c.x - r).floor().max(0.0) as usize;
    let y0 = (c.y - r).floor().max(0.0) as usize;
    let x1 = ((c.x + r).ceil().max(0.0) as usize).min(width);
    let y1 = ((c.y + r).ceil().max(0.0) as usize).min(height);

    for y in y0..y1 {
        for x in x0..x1 {
            let px = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if px.distance_squared(c) <= r * r {
                blend(buf, y * width + x, src, w256);
            }
        }
    }
}

// Liang-Barsky clip of p0-p1 against [0, w] x [0, h]
fn clip_line_rect(p0: &mut Point, p1: &mut Point, w: f32, h: f32) -> bool {
    if !(p0.x.is_finite() && p0.y.is_finite() && p1.x.is_finite() && p1.y.is_finite()) {
        return false;
    }
    let d = *p1 - *p0;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-d.x, p0.x),
        (d.x, w - p0.x),
        (-d.y, p0.y),
        (d.y, h - p0.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return false; // parallel and outside
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return false;
        }
    }

    let start = *p0;
    *p0 = start + d * t0;
    *p1 = start + d * t1;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Segment;
    use crate::light::LightSource;
    use crate::scene::LightView;

    const BG: u32 = 0x00_10_10_14;

    fn blank_frame() -> Frame {
        Frame {
            boundaries: Vec::new(),
            lights: Vec::new(),
        }
    }

    #[test]
    fn zero_size_buffer_is_untouched() {
        let mut buf: Vec<u32> = Vec::new();
        render_frame(&mut buf, 0, 0, &blank_frame());
        let mut buf = vec![7u32; 4];
        render_frame(&mut buf, 4, 2, &blank_frame()); // too small for 4x2
        assert_eq!(buf, vec![7; 4]);
    }

    #[test]
    fn clears_to_background() {
        let mut buf = vec![0u32; 16 * 8];
        render_frame(&mut buf, 16, 8, &blank_frame());
        assert!(buf.iter().all(|&p| p == BG));
    }

    #[test]
    fn opaque_wall_is_drawn() {
        let mut buf = vec![0u32; 20 * 10];
        let mut frame = blank_frame();
        frame.boundaries.push((
            Segment::new(Point::new(2.0, 5.0), Point::new(17.0, 5.0)),
            Color::WHITE,
        ));
        render_frame(&mut buf, 20, 10, &frame);
        for x in 2..=17 {
            assert_eq!(buf[5 * 20 + x], 0x00_FF_FF_FF, "x {x}");
        }
        assert_eq!(buf[4 * 20 + 10], BG);
    }

    #[test]
    fn border_on_far_edges_is_drawn() {
        let mut buf = vec![0u32; 12 * 8];
        let mut world = crate::world::World::new();
        world.push_border(12.0, 8.0, Color::WHITE);
        let frame = Frame {
            boundaries: world.walls().iter().map(|w| (w.segment, w.color)).collect(),
            lights: Vec::new(),
        };
        render_frame(&mut buf, 12, 8, &frame);
        assert!((0..8).all(|y| buf[y * 12 + 11] == 0x00_FF_FF_FF));
        assert!((0..12).all(|x| buf[7 * 12 + x] == 0x00_FF_FF_FF));
        assert_eq!(buf[3 * 12 + 5], BG);
    }

    #[test]
    fn off_screen_lines_are_clipped() {
        let mut buf = vec![0u32; 10 * 10];
        let mut frame = blank_frame();
        frame.boundaries.push((
            Segment::new(Point::new(-1000.0, 3.0), Point::new(1000.0, 3.0)),
            Color::WHITE,
        ));
        frame.boundaries.push((
            Segment::new(Point::new(-50.0, -50.0), Point::new(-10.0, -10.0)),
            Color::WHITE,
        ));
        render_frame(&mut buf, 10, 10, &frame);
        assert!((0..10).all(|x| buf[3 * 10 + x] == 0x00_FF_FF_FF));
        assert_eq!(buf.iter().filter(|&&p| p == 0x00_FF_FF_FF).count(), 10);
    }

    #[test]
    fn faint_fan_brightens_without_saturating() {
        let mut light = LightSource::new(
            Point::new(10.0, 10.0),
            Color::DEFAULT_LIGHT,
            Color::DEFAULT_RAY,
            4,
        );
        let mut world = crate::world::World::new();
        world.push_border(40.0, 20.0, Color::BLACK);
        let fan = light.spread(world.walls());
        let frame = Frame {
            boundaries: Vec::new(),
            lights: vec![LightView {
                pos: light.pos,
                color: light.color,
                ray_color: light.ray_color,
                active: false,
                fan,
            }],
        };
        let mut buf = vec![0u32; 40 * 20];
        render_frame(&mut buf, 40, 20, &frame);

        // A point on the rightward ray, beyond the stub and the disc.
        let lit = buf[10 * 40 + 30];
        assert_ne!(lit, BG);
        assert!((lit & 0xFF) < 0x40);
    }

    #[test]
    fn clip_keeps_inside_segment() {
        let mut a = Point::new(1.0, 1.0);
        let mut b = Point::new(5.0, 4.0);
        assert!(clip_line_rect(&mut a, &mut b, 10.0, 10.0));
        assert_eq!((a, b), (Point::new(1.0, 1.0), Point::new(5.0, 4.0)));
    }

    #[test]
    fn blend_weights() {
        assert_eq!(lerp_color_u32(0, 0x00_FF_FF_FF, 256), 0x00_FF_FF_FF);
        assert_eq!(lerp_color_u32(0x00_FF_FF_FF, 0, 0), 0x00_FF_FF_FF);
        assert_eq!(alpha_weight(0.0), 0);
        assert_eq!(alpha_weight(0.001), 1);
        assert_eq!(alpha_weight(1.0), 256);
    }
}
