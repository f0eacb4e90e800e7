//! The save operation: resolve a fresh target file, write optional
//! frontmatter, then tee the input into it.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::config::SaveConfig;
use crate::error::{Result, SaveError};
use crate::frontmatter::{self, FrontmatterTags};
use crate::target;
use crate::tee::{tee_lines, TeeStats};

/// Per-invocation options
#[derive(Debug, Clone, Default)]
pub struct SaveRequest {
    /// Primary tag, also used in the filename
    pub stub: String,
    /// Extra frontmatter tags, in the order given
    pub tags: Vec<String>,
    /// Do not echo input to stdout
    pub silent: bool,
    /// Include the configured default tag-set in frontmatter
    pub include_default_tags: bool,
}

/// What a completed save produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub path: PathBuf,
    pub frontmatter: bool,
    pub stats: TeeStats,
}

/// Save `input` using the current local time
pub fn save<R, E>(
    config: &SaveConfig,
    request: &SaveRequest,
    input: &mut R,
    echo: &mut E,
) -> Result<SaveOutcome>
where
    R: BufRead + ?Sized,
    E: Write + ?Sized,
{
    save_at(config, request, input, echo, &Local::now())
}

/// Save `input` as if run at `now`
pub fn save_at<R, E>(
    config: &SaveConfig,
    request: &SaveRequest,
    input: &mut R,
    echo: &mut E,
    now: &DateTime<Local>,
) -> Result<SaveOutcome>
where
    R: BufRead + ?Sized,
    E: Write + ?Sized,
{
    let stub = request.stub.as_str();
    if stub.is_empty() {
        return Err(SaveError::usage("a stub is required to name the file"));
    }
    if !config.output_dir.is_dir() {
        return Err(SaveError::missing_directory(&config.output_dir));
    }

    let stem = target::file_stem(stub, config.date_format.as_deref(), now)?;
    let (path, file) = target::create_target(&config.output_dir, &stem)?;
    let mut writer: BufWriter<File> = BufWriter::new(file);

    let tags = FrontmatterTags::collect(
        config.default_tags(),
        request.include_default_tags,
        stub,
        &request.tags,
    );
    if let Some(tags) = &tags {
        debug!(tags = %tags.line(), "writing frontmatter");
        writer.write_all(frontmatter::render(tags, now).as_bytes())?;
    }

    let echo = if request.silent { None } else { Some(echo) };
    let stats = tee_lines(input, &mut writer, echo)?;
    writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;

    info!(
        lines = stats.lines,
        bytes = stats.bytes,
        "saved {}",
        path.display()
    );

    Ok(SaveOutcome {
        path,
        frontmatter: tags.is_some(),
        stats,
    })
}
