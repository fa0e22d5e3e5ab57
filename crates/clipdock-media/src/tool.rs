//! Media tool interface - subprocess-backed probing and remuxing
//!
//! External processes do the heavy lifting; this module wraps them with
//! captured stderr, explicit exit-code checks, and a per-invocation timeout.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Suffix appended to the input path for the fast-start remux output.
pub const PROCESSED_SUFFIX: &str = ".processed";

#[derive(Debug, thiserror::Error)]
pub enum MediaToolError {
    #[error("Failed to execute {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} timed out after {seconds}s")]
    Timeout { tool: &'static str, seconds: u64 },

    #[error("{tool} failed: {stderr}")]
    Failed { tool: &'static str, stderr: String },

    #[error("No video streams found")]
    NoVideoStream,

    #[error("Could not parse probe output: {0}")]
    InvalidOutput(String),

    #[error("Invalid tool path: {0}")]
    InvalidToolPath(String),
}

/// Narrow interface over the external media tooling.
///
/// Both operations suspend the caller until the subprocess exits or the
/// configured timeout elapses.
#[async_trait]
pub trait MediaTool: Send + Sync {
    /// Width and height of the first video stream.
    async fn probe_dimensions(&self, path: &Path) -> Result<(u32, u32), MediaToolError>;

    /// Rewrite the container so playback metadata precedes media data
    /// (progressive-download playback), copying codecs without re-encoding.
    /// Returns the output path: the input path plus [`PROCESSED_SUFFIX`].
    async fn fast_start_remux(&self, input: &Path) -> Result<PathBuf, MediaToolError>;
}

/// ffmpeg/ffprobe implementation of [`MediaTool`].
pub struct FfmpegTool {
    ffmpeg_path: String,
    ffprobe_path: String,
    timeout: Duration,
}

/// Tool paths come from configuration; restrict them to plain path characters.
fn validate_tool_path(path: &str) -> Result<(), MediaToolError> {
    let ok = !path.is_empty()
        && path.chars().all(|c| {
            c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\'
        })
        && !path.contains("..");
    if ok {
        Ok(())
    } else {
        Err(MediaToolError::InvalidToolPath(path.to_string()))
    }
}

impl FfmpegTool {
    pub fn new(
        ffmpeg_path: String,
        ffprobe_path: String,
        timeout: Duration,
    ) -> Result<Self, MediaToolError> {
        validate_tool_path(&ffmpeg_path)?;
        validate_tool_path(&ffprobe_path)?;

        Ok(Self {
            ffmpeg_path,
            ffprobe_path,
            timeout,
        })
    }

    async fn run(
        &self,
        tool: &'static str,
        program: &str,
        args: &[&str],
        path_args: &[&Path],
    ) -> Result<Vec<u8>, MediaToolError> {
        let start = std::time::Instant::now();

        let mut command = Command::new(program);
        command.args(args);
        for p in path_args {
            command.arg(p);
        }
        command.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
        command.kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| MediaToolError::Timeout {
                tool,
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|source| MediaToolError::Spawn { tool, source })?;

        if !output.status.success() {
            return Err(MediaToolError::Failed {
                tool,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::info!(
            tool = tool,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Media tool invocation completed"
        );

        Ok(output.stdout)
    }
}

/// Parse ffprobe's JSON output (`-show_entries stream=width,height -of json`)
/// into the first stream's dimensions.
fn parse_probe_output(stdout: &[u8]) -> Result<(u32, u32), MediaToolError> {
    let probe_data: serde_json::Value = serde_json::from_slice(stdout)
        .map_err(|e| MediaToolError::InvalidOutput(e.to_string()))?;

    let streams = probe_data["streams"]
        .as_array()
        .ok_or(MediaToolError::NoVideoStream)?;
    let stream = streams.first().ok_or(MediaToolError::NoVideoStream)?;

    let width = stream["width"]
        .as_u64()
        .ok_or_else(|| MediaToolError::InvalidOutput("Could not parse width".to_string()))?
        as u32;

    let height = stream["height"]
        .as_u64()
        .ok_or_else(|| MediaToolError::InvalidOutput("Could not parse height".to_string()))?
        as u32;

    Ok((width, height))
}

#[async_trait]
impl MediaTool for FfmpegTool {
    #[tracing::instrument(skip(self), fields(
        process.executable.path = %self.ffprobe_path,
        media.operation = "probe"
    ))]
    async fn probe_dimensions(&self, path: &Path) -> Result<(u32, u32), MediaToolError> {
        let stdout = self
            .run(
                "ffprobe",
                &self.ffprobe_path,
                &[
                    "-v",
                    "error",
                    "-select_streams",
                    "v:0",
                    "-show_entries",
                    "stream=width,height",
                    "-of",
                    "json",
                ],
                &[path],
            )
            .await?;

        let (width, height) = parse_probe_output(&stdout)?;

        tracing::info!(width = width, height = height, "Video probe completed");

        Ok((width, height))
    }

    #[tracing::instrument(skip(self), fields(
        process.executable.path = %self.ffmpeg_path,
        media.operation = "faststart"
    ))]
    async fn fast_start_remux(&self, input: &Path) -> Result<PathBuf, MediaToolError> {
        let mut output_os = input.as_os_str().to_owned();
        output_os.push(PROCESSED_SUFFIX);
        let output_path = PathBuf::from(output_os);

        // ffmpeg interleaves paths and flag groups, so the command is
        // assembled directly instead of going through `run`.
        let start = std::time::Instant::now();
        let mut command = Command::new(&self.ffmpeg_path);
        command
            .arg("-i")
            .arg(input)
            .args(["-movflags", "faststart", "-map_metadata", "0", "-codec", "copy", "-f", "mp4"])
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        command.kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| MediaToolError::Timeout {
                tool: "ffmpeg",
                seconds: self.timeout.as_secs(),
            })?
            .map_err(|source| MediaToolError::Spawn {
                tool: "ffmpeg",
                source,
            })?;

        if !output.status.success() {
            return Err(MediaToolError::Failed {
                tool: "ffmpeg",
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::info!(
            output = %output_path.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Fast-start remux completed"
        );

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_probe_dimensions() {
        let json = br#"{"streams":[{"width":1920,"height":1080}]}"#;
        assert_eq!(parse_probe_output(json).unwrap(), (1920, 1080));
    }

    #[test]
    fn rejects_probe_output_without_streams() {
        assert!(matches!(
            parse_probe_output(br#"{"streams":[]}"#),
            Err(MediaToolError::NoVideoStream)
        ));
        assert!(matches!(
            parse_probe_output(br#"{}"#),
            Err(MediaToolError::NoVideoStream)
        ));
    }

    #[test]
    fn rejects_probe_output_with_missing_dimensions() {
        assert!(matches!(
            parse_probe_output(br#"{"streams":[{"width":1920}]}"#),
            Err(MediaToolError::InvalidOutput(_))
        ));
        assert!(matches!(
            parse_probe_output(b"not json"),
            Err(MediaToolError::InvalidOutput(_))
        ));
    }

    #[test]
    fn tool_path_validation() {
        assert!(validate_tool_path("ffmpeg").is_ok());
        assert!(validate_tool_path("/usr/local/bin/ffprobe").is_ok());
        assert!(validate_tool_path("ffmpeg; rm -rf /").is_err());
        assert!(validate_tool_path("../ffmpeg").is_err());
        assert!(validate_tool_path("").is_err());
    }

    #[test]
    fn remux_output_path_uses_fixed_suffix() {
        let input = Path::new("/tmp/abc.mp4");
        let mut expected = input.as_os_str().to_owned();
        expected.push(PROCESSED_SUFFIX);
        assert_eq!(PathBuf::from(expected), Path::new("/tmp/abc.mp4.processed"));
    }

    #[test]
    fn constructor_rejects_bad_paths() {
        assert!(FfmpegTool::new(
            "ffmpeg && true".to_string(),
            "ffprobe".to_string(),
            Duration::from_secs(10),
        )
        .is_err());
    }
}
