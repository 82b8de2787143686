//! Local audio duration probing
//!
//! Runs before the upload so the metadata patch can carry a duration
//! alongside the file reference. Never touches the network and never
//! fails the flow: an undeterminable duration is reported as `None`.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{anyhow, Context, Result};

/// Estimate playback duration in whole seconds, or `None` when it cannot
/// be determined.
pub async fn audio_duration(path: &Path) -> Option<u64> {
    let path: PathBuf = path.to_path_buf();
    // Header parsing and the ffmpeg probe both do blocking work
    let result = tokio::task::spawn_blocking(move || duration_blocking(&path)).await;
    match result {
        Ok(Ok(seconds)) => Some(seconds),
        Ok(Err(e)) => {
            log::debug!("duration probe failed: {}", e);
            None
        }
        Err(e) => {
            log::debug!("duration probe task failed: {}", e);
            None
        }
    }
}

fn duration_blocking(path: &Path) -> Result<u64> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "wav" => wav_duration(path),
        "mp3" | "m4a" => ffmpeg_duration(path),
        other => Err(anyhow!("unsupported container: {:?}", other)),
    }
}

/// Duration from the RIFF header: data chunk length over byte rate
fn wav_duration(path: &Path) -> Result<u64> {
    let bytes = std::fs::read(path).context("Failed to read wav file")?;
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(anyhow!("not a RIFF/WAVE file"));
    }

    let mut byte_rate: Option<u32> = None;
    let mut data_len: Option<u32> = None;
    let mut offset = 12;
    while offset + 8 <= bytes.len() {
        let chunk_id = &bytes[offset..offset + 4];
        let chunk_len = u32::from_le_bytes(bytes[offset + 4..offset + 8].try_into()?) as usize;
        let body = offset + 8;
        match chunk_id {
            b"fmt " if body + 16 <= bytes.len() => {
                byte_rate = Some(u32::from_le_bytes(bytes[body + 8..body + 12].try_into()?));
            }
            b"data" => {
                data_len = Some(chunk_len as u32);
            }
            _ => {}
        }
        // Chunks are word-aligned
        offset = body + chunk_len + (chunk_len & 1);
    }

    let byte_rate = byte_rate.ok_or_else(|| anyhow!("missing fmt chunk"))?;
    let data_len = data_len.ok_or_else(|| anyhow!("missing data chunk"))?;
    if byte_rate == 0 {
        return Err(anyhow!("zero byte rate"));
    }
    Ok((f64::from(data_len) / f64::from(byte_rate)).round() as u64)
}

/// Ask a system ffmpeg for the duration. Covers the compressed containers
/// without pulling a decoder into the client.
fn ffmpeg_duration(path: &Path) -> Result<u64> {
    let ffmpeg = which::which("ffmpeg").context("ffmpeg not found on PATH")?;

    let output = Command::new(ffmpeg)
        .arg("-i")
        .arg(path)
        .arg("-f")
        .arg("null")
        .arg("-")
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .context("Failed to run ffmpeg")?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    parse_ffmpeg_duration(&stderr).ok_or_else(|| anyhow!("no duration in ffmpeg output"))
}

/// Parse "Duration: HH:MM:SS.cc" from ffmpeg's banner output
fn parse_ffmpeg_duration(stderr: &str) -> Option<u64> {
    for line in stderr.lines() {
        if let Some(rest) = line.split("Duration:").nth(1) {
            let time = rest.split(',').next()?.trim();
            if time.eq_ignore_ascii_case("N/A") {
                continue;
            }
            let parts: Vec<&str> = time.split(':').collect();
            if parts.len() == 3 {
                let hours: f64 = parts[0].parse().unwrap_or(0.0);
                let minutes: f64 = parts[1].parse().unwrap_or(0.0);
                let seconds: f64 = parts[2].parse().unwrap_or(0.0);
                return Some((hours * 3600.0 + minutes * 60.0 + seconds).round() as u64);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Minimal PCM wav: 16kHz, mono, 16-bit, `seconds` long
    fn write_wav(path: &Path, seconds: u32) {
        let sample_rate: u32 = 16_000;
        let byte_rate: u32 = sample_rate * 2;
        let data_len: u32 = byte_rate * seconds;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&byte_rate.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
        bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(bytes.len() + data_len as usize, 0);

        let mut file = std::fs::File::create(path).unwrap();
        file.write_all(&bytes).unwrap();
    }

    #[test]
    fn wav_duration_from_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        write_wav(&path, 3);
        assert_eq!(wav_duration(&path).unwrap(), 3);
    }

    #[test]
    fn garbage_wav_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        std::fs::write(&path, b"definitely not audio").unwrap();
        assert!(wav_duration(&path).is_err());
    }

    #[tokio::test]
    async fn unsupported_container_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.ogg");
        std::fs::write(&path, b"x").unwrap();
        assert_eq!(audio_duration(&path).await, None);
    }

    #[tokio::test]
    async fn missing_file_degrades_to_none() {
        assert_eq!(audio_duration(Path::new("/no/such/clip.wav")).await, None);
    }

    #[test]
    fn parses_ffmpeg_banner() {
        let stderr = "Input #0, mp3, from 'clip.mp3':\n  Duration: 00:03:25.48, start: 0.000000, bitrate: 128 kb/s\n";
        assert_eq!(parse_ffmpeg_duration(stderr), Some(205));
    }

    #[test]
    fn ignores_unknown_ffmpeg_duration() {
        let stderr = "  Duration: N/A, bitrate: N/A\n";
        assert_eq!(parse_ffmpeg_duration(stderr), None);
    }
}
