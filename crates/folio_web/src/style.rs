//! Inline CSS for ambient-layer elements.

use folio_core::{
    GridAxis, GridLine, MoteFrame, OrbFrame, Particle, Projection, RevealFrame, PALETTE,
};

/// Classes for one particle node.
pub const PARTICLE_CLASS: &str = "absolute rounded-full pointer-events-none";
/// Classes for one orb node.
pub const ORB_CLASS: &str = "floating-orb absolute rounded-full pointer-events-none";
/// Classes for one grid line node.
pub const GRID_LINE_CLASS: &str = "grid-line absolute pointer-events-none";
/// Classes for one rising mote node.
pub const MOTE_CLASS: &str = "particle absolute rounded-full pointer-events-none";

/// Static styles set once when a particle element is created.
pub fn particle_styles(particle: &Particle) -> [(&'static str, String); 4] {
    let size = particle.size();
    let color = particle.color().css();
    [
        ("width", format!("{size}px")),
        ("height", format!("{size}px")),
        (
            "background",
            format!("radial-gradient(circle, {color} 0%, transparent 70%)"),
        ),
        ("box-shadow", format!("0 0 {}px {color}", size * 2.0)),
    ]
}

/// Per-frame styles for a particle.
pub fn projection_styles(projection: &Projection) -> [(&'static str, String); 2] {
    [
        (
            "transform",
            format!(
                "translate3d({:.2}px, {:.2}px, 0) scale({:.4})",
                projection.x, projection.y, projection.scale
            ),
        ),
        ("opacity", format!("{:.4}", projection.opacity)),
    ]
}

/// Static size and glow of the orb at `index`.
pub fn orb_node_styles(index: usize) -> [(&'static str, String); 4] {
    // Purple, blue, pink.
    const COLORS: [usize; 3] = [0, 1, 3];
    let size = 20 + index * 10;
    let color = PALETTE[COLORS[index % COLORS.len()]].css_alpha(0.6);
    [
        ("width", format!("{size}px")),
        ("height", format!("{size}px")),
        (
            "background",
            format!("radial-gradient(circle, {color} 0%, transparent 70%)"),
        ),
        ("filter", "blur(4px)".to_string()),
    ]
}

/// Per-frame styles for an orb.
pub fn orb_styles(frame: &OrbFrame) -> [(&'static str, String); 2] {
    [
        (
            "transform",
            format!(
                "translate3d({:.2}px, {:.2}px, 0) rotate({:.2}deg) scale({:.4})",
                frame.x, frame.y, frame.rotation, frame.scale
            ),
        ),
        ("opacity", format!("{:.4}", frame.opacity)),
    ]
}

/// Static placement and gradient of a grid line.
pub fn grid_line_styles(line: &GridLine) -> [(&'static str, String); 7] {
    let position = format!("{:.2}%", line.position_pct);
    match line.axis {
        GridAxis::Vertical => [
            ("left", position),
            ("top", "0".to_string()),
            ("width", "1px".to_string()),
            ("height", "100%".to_string()),
            (
                "background",
                "linear-gradient(to bottom, transparent, hsl(180 100% 50% / 0.2), transparent)"
                    .to_string(),
            ),
            ("opacity", "0.1".to_string()),
            ("transform", "translate3d(0px, 0, 0)".to_string()),
        ],
        GridAxis::Horizontal => [
            ("top", position),
            ("left", "0".to_string()),
            ("width", "100%".to_string()),
            ("height", "1px".to_string()),
            (
                "background",
                "linear-gradient(to right, transparent, hsl(280 100% 70% / 0.2), transparent)"
                    .to_string(),
            ),
            ("opacity", "0.1".to_string()),
            ("transform", "translate3d(0px, 0, 0)".to_string()),
        ],
    }
}

/// Per-frame sway of a grid line.
pub fn grid_offset_styles(offset: f64) -> [(&'static str, String); 1] {
    [("transform", format!("translate3d({offset:.2}px, 0, 0)"))]
}

/// Static size and glow of a mote.
pub fn mote_styles(frame: &MoteFrame) -> [(&'static str, String); 4] {
    let color = frame.color.css_alpha(0.8);
    [
        ("width", "4px".to_string()),
        ("height", "4px".to_string()),
        ("background", color.clone()),
        ("box-shadow", format!("0 0 6px {color}")),
    ]
}

/// Per-frame position of a mote.
pub fn mote_position_styles(frame: &MoteFrame) -> [(&'static str, String); 1] {
    [(
        "transform",
        format!("translate3d({:.2}px, {:.2}px, 0)", frame.x, frame.y),
    )]
}

/// Per-frame styles for an element running an entrance animation.
pub fn reveal_styles(frame: &RevealFrame) -> [(&'static str, String); 2] {
    [
        (
            "transform",
            format!("translateY({:.2}px) scale({:.4})", frame.y, frame.scale),
        ),
        ("opacity", format!("{:.4}", frame.opacity)),
    ]
}

#[cfg(test)]
mod tests {
    use super::{
        grid_line_styles, grid_offset_styles, mote_position_styles, mote_styles, orb_node_styles,
        orb_styles, particle_styles, projection_styles, reveal_styles,
    };
    use folio_core::{
        GridAxis, GridLine, MoteFrame, OrbFrame, Particle, Projection, RevealFrame, Vec3, PALETTE,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn particle_styles_use_size_and_palette_color() {
        let particle = Particle::new(Vec3::default(), 3.0, PALETTE[0], 0.0, 0.1);
        let styles = particle_styles(&particle);
        assert_eq!(styles[0], ("width", "3px".to_string()));
        assert_eq!(
            styles[2].1,
            "radial-gradient(circle, hsl(280 100% 70%) 0%, transparent 70%)"
        );
        assert_eq!(styles[3].1, "0 0 6px hsl(280 100% 70%)");
    }

    #[test]
    fn projection_styles_format_transform_and_opacity() {
        let styles = projection_styles(&Projection {
            x: 10.0,
            y: -50.0,
            scale: 0.5,
            opacity: 0.4,
        });
        assert_eq!(
            styles[0].1,
            "translate3d(10.00px, -50.00px, 0) scale(0.5000)"
        );
        assert_eq!(styles[1].1, "0.4000");
    }

    #[test]
    fn orb_styles_include_rotation() {
        let styles = orb_styles(&OrbFrame {
            rotation: 90.0,
            ..OrbFrame::default()
        });
        assert!(styles[0].1.contains("rotate(90.00deg)"));
        assert_eq!(styles[1].1, "1.0000");
    }

    #[test]
    fn grid_lines_anchor_on_their_axis() {
        let vertical = grid_line_styles(&GridLine {
            axis: GridAxis::Vertical,
            position_pct: 12.5,
        });
        assert_eq!(vertical[0], ("left", "12.50%".to_string()));
        assert_eq!(vertical[2], ("width", "1px".to_string()));

        let horizontal = grid_line_styles(&GridLine {
            axis: GridAxis::Horizontal,
            position_pct: 100.0 / 6.0,
        });
        assert_eq!(horizontal[0], ("top", "16.67%".to_string()));
        assert_eq!(grid_offset_styles(-50.0)[0].1, "translate3d(-50.00px, 0, 0)");
    }

    #[test]
    fn motes_use_translucent_palette_color() {
        let frame = MoteFrame {
            x: 12.0,
            y: 650.0,
            color: PALETTE[2],
        };
        assert_eq!(mote_styles(&frame)[2].1, "hsl(180 100% 50% / 0.8)");
        assert_eq!(
            mote_position_styles(&frame)[0].1,
            "translate3d(12.00px, 650.00px, 0)"
        );
    }

    #[test]
    fn settled_reveal_is_fully_visible() {
        let styles = reveal_styles(&RevealFrame::SETTLED);
        assert_eq!(styles[0].1, "translateY(0.00px) scale(1.0000)");
        assert_eq!(styles[1].1, "1.0000");
    }

    #[test]
    fn orbs_grow_and_cycle_colors_by_index() {
        let first = orb_node_styles(0);
        assert_eq!(first[0].1, "20px");
        assert!(first[2].1.contains("hsl(280 100% 70% / 0.6)"));

        let third = orb_node_styles(2);
        assert_eq!(third[1].1, "40px");
        assert!(third[2].1.contains("hsl(320 100% 75% / 0.6)"));
    }
}
