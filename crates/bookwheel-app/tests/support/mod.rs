use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::anyhow;
use bookwheel_core::fetch::{FetchResponse, SheetFetcher};

pub static ENV_LOCK: Mutex<()> = Mutex::new(());

pub const SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/d/abc123/edit?gid=42#gid=42";
pub const EXPORT_URL: &str =
    "https://docs.google.com/spreadsheets/d/abc123/export?format=csv&gid=42";

pub const EXPORT: &str = "\
Nombre,Autor,Estatus,Propuesto por
Dune,Frank Herbert,Leído,Ana
Emma,Jane Austen,Pendiente,Luis
,,,
Ubik,Philip K. Dick,Leído,Marta
Kindred,Octavia E. Butler,,Sara
";

#[derive(Default)]
pub struct QueueFetcher {
    responses: Mutex<VecDeque<anyhow::Result<FetchResponse>>>,
    calls: Mutex<Vec<String>>,
}

impl QueueFetcher {
    pub fn new(responses: Vec<anyhow::Result<FetchResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl SheetFetcher for QueueFetcher {
    fn fetch(&self, url: &str) -> anyhow::Result<FetchResponse> {
        self.calls.lock().expect("calls lock").push(url.to_string());

        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("missing scripted response")))
    }
}

pub fn response(status: u16, status_text: &str, body: &str) -> anyhow::Result<FetchResponse> {
    Ok(FetchResponse {
        status,
        status_text: status_text.to_string(),
        body: body.to_string(),
    })
}

#[allow(dead_code)]
pub fn write_config(home: &Path, contents: &str) {
    let dir = home.join(".config").join("bookwheel");
    fs::create_dir_all(&dir).expect("config dir");
    fs::write(dir.join("config.toml"), contents).expect("write config");
}
