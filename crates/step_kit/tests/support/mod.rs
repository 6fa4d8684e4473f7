#![allow(dead_code)]

use std::{
    io::{self, Write},
    path::Path,
    sync::{Arc, Mutex},
};

use step_kit::{MemoryEnv, StepContext};

pub const EOL: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Cloneable stdout sink whose contents tests can inspect.
#[derive(Clone, Default)]
pub struct CapturedStdout(Arc<Mutex<Vec<u8>>>);

impl CapturedStdout {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_string).collect()
    }
}

impl Write for CapturedStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn step_with_env(env: Arc<MemoryEnv>) -> (StepContext, CapturedStdout) {
    let out = CapturedStdout::default();
    let step = StepContext::builder().env(env).stdout(out.clone()).build();
    (step, out)
}

pub fn touch(path: &Path) -> String {
    std::fs::write(path, "").unwrap();
    path.to_string_lossy().into_owned()
}

/// Splits file-channel blocks back into `(key, value)` pairs.
pub fn parse_blocks(text: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut lines = text.split(EOL);
    while let Some(header) = lines.next() {
        if header.is_empty() {
            continue;
        }
        let (key, delimiter) = header.split_once("<<").expect("block header");
        let mut value_lines = Vec::new();
        for line in lines.by_ref() {
            if line == delimiter {
                break;
            }
            value_lines.push(line);
        }
        out.push((key.to_string(), value_lines.join(EOL)));
    }
    out
}
