use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::model::AgentModel;

/// JSON sink for command output: a file when a path is given, stdout
/// otherwise.
#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        match self {
            Output::Stdout { writer } => {
                serde_json::to_writer_pretty(&mut *writer, value)?;
                writeln!(writer)?;
            }
            Output::File { writer, path } => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
                writeln!(writer)?;
                writer.flush()?;
            }
        }
        Ok(())
    }
}

pub fn read_model_file(path: &Path) -> anyhow::Result<AgentModel> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open model file: {}", path.display()))?;
    let model = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse model file: {}", path.display()))?;
    Ok(model)
}
