//! Combined audio+video size estimation for streams whose metadata only
//! partially reports sizes.

use ytdlp::Format;

/// Baseline video bitrates in kbps per resolution tier, one triple per tier:
/// (AVC-like, AV1-like, VP9-like). Tiers are iterated top-down; the first
/// tier at minimum distance from the actual height wins.
const TIER_BITRATES: [(u32, [f64; 3]); 7] = [
    (2160, [25000.0, 15000.0, 18000.0]),
    (1440, [16000.0, 10000.0, 12000.0]),
    (1080, [8000.0, 5000.0, 6000.0]),
    (720, [5000.0, 3000.0, 3500.0]),
    (480, [2500.0, 1500.0, 1800.0]),
    (360, [1000.0, 600.0, 700.0]),
    (240, [700.0, 400.0, 500.0]),
];

const DEFAULT_AUDIO_KBPS: f64 = 128.0;

/// Estimate the total byte size of a video stream merged with its audio.
///
/// Priority order: reported byte sizes, then bitrate times duration, then a
/// codec-aware per-tier bitrate guess. Absent data degrades toward 0
/// ("unknown") rather than failing.
pub fn estimate_size(video: &Format, audio: Option<&Format>, duration: f64) -> u64 {
    let video_size = video.size_hint();
    let audio_size = audio.and_then(|a| a.filesize);

    if let (Some(v), Some(a)) = (video_size, audio_size) {
        return v + a;
    }

    if duration > 0.0 {
        if let Some(video_bitrate) = video.video_bitrate() {
            let audio_bitrate = audio
                .and_then(|a| a.abr)
                .unwrap_or(DEFAULT_AUDIO_KBPS);
            return bitrate_to_bytes(video_bitrate, duration)
                + bitrate_to_bytes(audio_bitrate, duration);
        }
    }

    let height = video.height.unwrap_or(720);
    let fps = video.fps.unwrap_or(30.0);
    let mut bitrate = tier_bitrate(height, video.vcodec.as_deref());

    if fps > 30.0 {
        bitrate *= fps / 30.0;
    }

    if duration > 0.0 {
        return bitrate_to_bytes(bitrate, duration)
            + bitrate_to_bytes(DEFAULT_AUDIO_KBPS, duration);
    }

    match (video_size, audio) {
        (Some(size), Some(audio)) => {
            // Duration is unknown here, so the audio share can only be
            // approximated as a fraction of the video size, capped at 15%.
            let surcharge = (audio.abr.unwrap_or(DEFAULT_AUDIO_KBPS) / 1000.0).min(0.15);
            scale(size, 1.0 + surcharge)
        }
        (Some(size), None) => size,
        (None, _) => 0
    }
}

fn tier_bitrate(height: u32, vcodec: Option<&str>) -> f64 {
    let (_, bitrates) = TIER_BITRATES
        .iter()
        .min_by_key(|(tier, _)| i64::from(*tier).abs_diff(i64::from(height)))
        .copied()
        .unwrap_or(TIER_BITRATES[3]);

    let codec = vcodec.unwrap_or("avc1").to_lowercase();
    if codec.contains("av01") || codec.contains("av1") {
        bitrates[1]
    } else if codec.contains("vp9") || codec.contains("vp09") {
        bitrates[2]
    } else {
        bitrates[0]
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bitrate_to_bytes(kbps: f64, duration: f64) -> u64 {
    (kbps * 1000.0 / 8.0 * duration) as u64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn scale(bytes: u64, factor: f64) -> u64 {
    (bytes as f64 * factor) as u64
}
