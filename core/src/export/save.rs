use crate::document::Axes;
use crate::prelude::{PlotError, PlotResult};
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Web player that renders saved JSON documents.
pub const VIEWER_URL: &str = "https://animate.deno.dev";

/// Whitespace used when writing JSON documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    Pretty,
    #[default]
    Compact,
}

/// File format written by [`Axes::savefig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Tiff,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Tiff => "tiff",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PlotError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "tiff" => Ok(OutputFormat::Tiff),
            other => Err(PlotError::InvalidData(format!(
                "unknown output format `{}`, expected json or tiff",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    pub style: OutputStyle,
    pub format: OutputFormat,
    /// Write even when the file extension disagrees with `format`.
    pub force: bool,
    /// Log where to upload the saved JSON document.
    pub announce: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            style: OutputStyle::Compact,
            format: OutputFormat::Json,
            force: false,
            announce: true,
        }
    }
}

impl Axes {
    /// Serializes the document. Pretty output indents by four spaces; compact
    /// output puts every item on its own line without indentation.
    pub fn to_json(&self, style: OutputStyle) -> PlotResult<String> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer, style)?;
        String::from_utf8(buffer).map_err(|err| PlotError::Encoding(err.to_string()))
    }

    fn write_json<W: Write>(&self, writer: W, style: OutputStyle) -> PlotResult<()> {
        let indent: &[u8] = match style {
            OutputStyle::Pretty => b"    ",
            OutputStyle::Compact => b"",
        };
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent);
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }

    /// Parses a document and checks its pages against the shape options.
    pub fn from_json(text: &str) -> PlotResult<Self> {
        let axes: Axes = serde_json::from_str(text)?;
        axes.verify_frames()?;
        Ok(axes)
    }

    /// Reads a document previously written with [`OutputFormat::Json`].
    pub fn load<P: AsRef<Path>>(path: P) -> PlotResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Writes the figure as a JSON document or as the raw multi-page TIFF.
    pub fn savefig<P: AsRef<Path>>(&self, path: P, options: &SaveOptions) -> PlotResult<()> {
        let path = path.as_ref();
        let logger = LogManager::new("export");

        if let Some(extension) = path.extension() {
            let extension = extension.to_string_lossy();
            if !extension.eq_ignore_ascii_case(options.format.extension()) {
                if !options.force {
                    return Err(PlotError::ExtensionMismatch {
                        format: options.format.extension().to_string(),
                        extension: extension.into_owned(),
                    });
                }
                logger.caution(&format!(
                    "writing {} output to {} anyway",
                    options.format.extension(),
                    path.display()
                ));
            }
        }

        match options.format {
            OutputFormat::Tiff => {
                let data = self.data().ok_or(PlotError::DataNotLoaded)?;
                fs::write(path, data)?;
                logger.record(&format!("wrote {} TIFF bytes to {}", data.len(), path.display()));
            }
            OutputFormat::Json => {
                let mut writer = BufWriter::new(File::create(path)?);
                self.write_json(&mut writer, options.style)?;
                writer.flush()?;
                logger.detail(&format!("wrote {:?} JSON to {}", options.style, path.display()));
                if options.announce {
                    logger.record(&format!("upload {} to {}", path.display(), VIEWER_URL));
                }
            }
        }

        Ok(())
    }
}
