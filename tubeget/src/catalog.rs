//! Builds the user-facing quality menu from the extractor's raw format list.

use std::collections::HashSet;

use ytdlp::Format;

use crate::display::{format_duration, format_file_size};
use crate::estimate::estimate_size;

/// Deduplicated, display-ready quality menu. One row per distinct
/// (height, fps) pair, sorted best-first.
#[derive(Debug)]
pub struct QualityMenu {
    pub rows: Vec<Format>,
    pub audio_note: String,
    best_audio: Option<Format>,
    fallback_duration: f64
}

impl QualityMenu {
    pub fn build(formats: &[Format], fallback_duration: f64) -> Self {
        let best_audio = best_audio_format(formats).cloned();
        let audio_note = match &best_audio {
            Some(audio) => {
                let abr = audio.abr.map_or_else(|| "128".to_string(), |a| a.to_string());
                format!("AAC {abr}k")
            }
            None => "Included".to_string()
        };

        let mut candidates: Vec<&Format> = formats
            .iter()
            .filter(|f| f.height.is_some() && f.has_video())
            .collect();

        // First pass keeps the first entry seen per (height, fps) after a
        // height-descending sort; display order is then re-sorted by
        // (height, fps), so selection indexes follow the final order.
        candidates.sort_by(|a, b| b.height.cmp(&a.height));

        let mut seen = HashSet::new();
        let mut rows: Vec<Format> = Vec::new();
        for format in candidates {
            let key = (format.height.unwrap_or(0), format.fps.unwrap_or(30.0).to_bits());
            if seen.insert(key) {
                rows.push(format.clone());
            }
        }

        rows.sort_by(|a, b| {
            b.height
                .unwrap_or(0)
                .cmp(&a.height.unwrap_or(0))
                .then(b.fps.unwrap_or(30.0).total_cmp(&a.fps.unwrap_or(30.0)))
        });

        Self {
            rows,
            audio_note,
            best_audio,
            fallback_duration
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Render the menu as a table, one numbered row per quality.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("\nAvailable video qualities:\n");
        out.push_str(&"-".repeat(92));
        out.push('\n');
        out.push_str(
            "  # | Quality | Resolution | FPS | Format | Bitrate |  Est.size | Duration | Audio\n"
        );
        out.push_str(&"-".repeat(92));
        out.push('\n');

        for (i, row) in self.rows.iter().enumerate() {
            out.push_str(&self.render_row(i + 1, row));
            out.push('\n');
        }

        out
    }

    fn render_row(&self, index: usize, row: &Format) -> String {
        let height = row.height.unwrap_or(0);
        let resolution = match row.width {
            Some(w) => format!("{w}x{height}"),
            None => format!("?x{height}")
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let fps = row.fps.unwrap_or(30.0).round() as u32;
        let ext = row.ext.as_deref().unwrap_or("mp4");
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bitrate = match row.video_bitrate() {
            Some(b) if b > 0.0 => format!("{}k", b as u64),
            _ => "?".to_string()
        };
        let duration = row.duration.unwrap_or(self.fallback_duration);
        let size = estimate_size(row, self.best_audio.as_ref(), duration);

        format!(
            "{index:2} | {label:>7} | {resolution:>10} | {fps:>3} | {ext:>6} | {bitrate:>7} | {size:>9} | {duration:>8} | {audio}",
            label = quality_label(height),
            size = format_file_size(size),
            duration = format_duration(duration),
            audio = self.audio_note
        )
    }
}

/// Pick the audio-only format with the highest average bitrate. The first
/// entry seen at the maximum bitrate wins; a missing bitrate counts as 0.
pub fn best_audio_format(formats: &[Format]) -> Option<&Format> {
    let mut best: Option<&Format> = None;
    for format in formats {
        if format.has_video() || !format.has_audio() {
            continue;
        }
        let abr = format.abr.unwrap_or(0.0);
        if best.is_none_or(|b| abr > b.abr.unwrap_or(0.0)) {
            best = Some(format);
        }
    }
    best
}

/// Map a height to the conventional quality tier name.
pub fn quality_label(height: u32) -> String {
    if height >= 2160 {
        "4K".to_string()
    } else if height >= 1440 {
        "2K".to_string()
    } else if height >= 1080 {
        "1080p".to_string()
    } else if height >= 720 {
        "720p".to_string()
    } else if height >= 480 {
        "480p".to_string()
    } else if height >= 360 {
        "360p".to_string()
    } else {
        format!("{height}p")
    }
}
