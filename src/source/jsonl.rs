//! Recorded keypoint frames, one JSON object per line.
//!
//! ```text
//! {"timestampMs":0,"keypoints":[{"joint":"left_knee","x":210.0,"y":300.0,"score":0.92}, ...]}
//! {"timestampMs":80,"keypoints":[...]}
//! ```
//!
//! Joints missing from `keypoints` are absent from the frame.  Blank lines are
//! skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::pose::ExerciseSample;
use crate::source::{PoseSource, SourceError};

#[derive(Debug)]
pub struct JsonlPoseSource<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl JsonlPoseSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::info!("source: reading frames from {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonlPoseSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// 1-based number of the last line read.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead + Send> PoseSource for JsonlPoseSource<R> {
    fn next_sample(&mut self) -> Result<Option<ExerciseSample>, SourceError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }
            return serde_json::from_str(text)
                .map(Some)
                .map_err(|source| SourceError::Parse {
                    line: self.line,
                    source,
                });
        }
    }
}
