//! SVG flame chart generation from layout blocks.
//!
//! Unlike a sampled flamegraph, blocks keep their trace timeline position:
//! - Top panel: primary thread events, outermost row first
//! - Bottom panel: worker thread events
//! - Colors hashed from the full event name inside an `inferno` palette

use super::layout::{max_depth, max_right, Block};
use crate::utils::config::{
    DEFAULT_FLAMEGRAPH_WIDTH, DEFAULT_FRAME_HEIGHT, MICROS_PER_MILLI, MIN_TIMELINE_SPAN,
};
use crate::utils::error::FlamegraphError;
use inferno::flamegraph::color::{BasicPalette, Palette};
use log::info;
use quick_xml::escape::escape;
use std::str::FromStr;

const TITLE_HEIGHT: usize = 30;
const PANEL_GAP: usize = 10;
const XPAD: usize = 10;
const MIN_BLOCK_WIDTH: f64 = 0.5;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
    pub frame_height: usize,
    /// Palette per color class (primary, worker)
    pub palettes: [BasicPalette; 2],
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Compilation Time Trace".to_string(),
            width: DEFAULT_FLAMEGRAPH_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            palettes: [BasicPalette::Hot, BasicPalette::Aqua],
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Palette of the primary panel
    pub fn with_palette(mut self, palette: BasicPalette) -> Self {
        self.palettes[0] = palette;
        self
    }

    fn palette_for(&self, color_class: u8) -> BasicPalette {
        self.palettes[usize::from(color_class.min(1))]
    }
}

/// Parse a palette name as accepted by inferno (`hot`, `mem`, `aqua`, ...)
///
/// Only single-hue palettes make sense for a time chart.
pub fn parse_palette(name: &str) -> Result<BasicPalette, String> {
    match Palette::from_str(name)? {
        Palette::Basic(palette) => Ok(palette),
        _ => Err(format!("palette '{}' is not a basic palette", name)),
    }
}

/// Vertical extent of one panel
struct Panel<'a> {
    blocks: &'a [Block],
    top: usize,
    height: usize,
}

impl<'a> Panel<'a> {
    fn new(blocks: &'a [Block], top: usize, frame_height: usize) -> Self {
        let rows = max_depth(blocks).map_or(0, |depth| depth + 1);
        Self {
            blocks,
            top,
            height: rows * frame_height,
        }
    }

    fn bottom(&self) -> usize {
        self.top + self.height
    }
}

/// Generate SVG flame chart from the two block panels
///
/// **Public** - main entry point for rendering
///
/// When the bottom panel is empty the top blocks are drawn there instead,
/// leaving the top panel empty.
///
/// # Errors
/// * `FlamegraphError::EmptyBlocks` - both panels are empty
pub fn generate_flamegraph(
    top_blocks: &[Block],
    bottom_blocks: &[Block],
    config: &FlamegraphConfig,
) -> Result<String, FlamegraphError> {
    if top_blocks.is_empty() && bottom_blocks.is_empty() {
        return Err(FlamegraphError::EmptyBlocks);
    }

    let (top_blocks, bottom_blocks) = if bottom_blocks.is_empty() {
        (bottom_blocks, top_blocks)
    } else {
        (top_blocks, bottom_blocks)
    };

    info!(
        "Generating flamegraph with {} + {} blocks",
        top_blocks.len(),
        bottom_blocks.len()
    );

    let span = max_right(top_blocks)
        .max(max_right(bottom_blocks))
        .max(MIN_TIMELINE_SPAN);
    let scale = config.width.saturating_sub(2 * XPAD) as f64 / span as f64;

    let top_panel = Panel::new(top_blocks, TITLE_HEIGHT, config.frame_height);
    let bottom_panel = Panel::new(
        bottom_blocks,
        top_panel.bottom() + PANEL_GAP,
        config.frame_height,
    );
    let total_height = bottom_panel.bottom() + PANEL_GAP;
    let width = config.width;

    let mut svg_content = String::new();

    // Header
    svg_content.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, total_height, width, total_height
    ));

    // Styles
    svg_content.push_str(
        r#"<style>.func { font: 12px sans-serif; } .func:hover { stroke: black; stroke-width: 1; cursor: pointer; opacity: 0.9; }</style>"#,
    );

    // Title
    svg_content.push_str(&format!(
        r#"<text x="{}" y="20" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2,
        escape(&config.title)
    ));

    for panel in [&top_panel, &bottom_panel] {
        for block in panel.blocks {
            render_block(block, panel, scale, config, &mut svg_content);
        }
    }

    svg_content.push_str("</svg>");

    info!(
        "Flamegraph generated successfully ({} bytes)",
        svg_content.len()
    );
    Ok(svg_content)
}

fn render_block(
    block: &Block,
    panel: &Panel,
    scale: f64,
    config: &FlamegraphConfig,
    out: &mut String,
) {
    let w = block.width as f64 * scale;
    if w < MIN_BLOCK_WIDTH {
        return;
    }

    let x = XPAD as f64 + block.offset as f64 * scale;
    let y = panel.top + block.depth * config.frame_height;
    let color = block_color(config.palette_for(block.color_class), block);

    out.push_str(&format!(
        r#"<rect x="{:.2}" y="{}" width="{:.2}" height="{}" fill="{}" stroke="white" stroke-width="0.5" class="func">"#,
        x, y, w, config.frame_height, color
    ));
    out.push_str(&format!(
        r#"<title>{} ({:.3} ms)</title></rect>"#,
        escape(&block.full_name),
        block.width as f64 / MICROS_PER_MILLI
    ));

    if let Some(display_name) = get_truncated_name(&block.name, w) {
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{}" dx="4" dy="12" font-size="11" pointer-events="none">{}</text>"#,
            x,
            y,
            escape(&display_name)
        ));
    }
}

/// Stable hash in [0, 1] of a name, so equal names share a color across graphs
fn name_hash(name: &str) -> f32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in name.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    (hash % 1000) as f32 / 999.0
}

macro_rules! shade {
    ($base:expr, $range:expr, $v:expr) => {
        $base + ($range as f32 * $v) as u8
    };
}

fn block_color(palette: BasicPalette, block: &Block) -> String {
    let v1 = name_hash(&block.full_name);
    let v2 = name_hash(&block.name);
    let (r, g, b) = match palette {
        BasicPalette::Hot => (shade!(205, 50, v2), shade!(0, 230, v1), shade!(0, 55, v2)),
        BasicPalette::Mem => (shade!(0, 0, v2), shade!(190, 50, v2), shade!(0, 210, v1)),
        BasicPalette::Io => (shade!(80, 60, v1), shade!(80, 60, v1), shade!(190, 55, v2)),
        BasicPalette::Red => (shade!(200, 55, v1), shade!(50, 80, v1), shade!(50, 80, v1)),
        BasicPalette::Green => (shade!(50, 60, v1), shade!(200, 55, v1), shade!(50, 60, v1)),
        BasicPalette::Blue => (shade!(80, 60, v1), shade!(80, 60, v1), shade!(205, 50, v1)),
        BasicPalette::Yellow => (shade!(175, 55, v1), shade!(175, 55, v1), shade!(50, 20, v1)),
        BasicPalette::Purple => (shade!(190, 65, v1), shade!(80, 60, v1), shade!(190, 65, v1)),
        BasicPalette::Orange => (shade!(190, 65, v1), shade!(90, 65, v1), shade!(0, 0, v1)),
        _ => (shade!(50, 60, v1), shade!(165, 55, v1), shade!(165, 55, v1)),
    };

    // Deeper rows fade toward white
    let fade = (block.depth as f32 * 0.04).min(0.4);
    let lighten = |c: u8| c + ((255 - c) as f32 * fade) as u8;
    format!("rgb({},{},{})", lighten(r), lighten(g), lighten(b))
}

/// Calculate truncated name for a block based on its pixel width
pub fn get_truncated_name(name: &str, width: f64) -> Option<String> {
    const MIN_LABEL_WIDTH: f64 = 35.0;
    const CHAR_WIDTH: f64 = 7.0;

    if width <= MIN_LABEL_WIDTH || name.is_empty() {
        return None;
    }

    let max_chars = (width / CHAR_WIDTH) as usize;
    let char_count = name.chars().count();
    if char_count > max_chars && max_chars > 3 {
        let kept: String = name.chars().take(max_chars - 3).collect();
        Some(format!("{}...", kept))
    } else {
        Some(name.to_string())
    }
}
