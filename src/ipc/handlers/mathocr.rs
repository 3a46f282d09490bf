use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::mathocr;
use anyhow::Context;
use serde_json::json;
use std::path::{Path, PathBuf};

fn problems_result(problems: &[mathocr::MathProblem]) -> serde_json::Value {
    json!({
        "problems": problems,
        "count": problems.len(),
    })
}

fn handle_solve_text(req: &Request) -> serde_json::Value {
    let Some(text) = req.params.get("text").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.text", None);
    };

    let problems = mathocr::extract_and_solve(text);
    ok(&req.id, problems_result(&problems))
}

fn read_worksheet(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("read worksheet text {}", path.to_string_lossy()))
}

fn handle_solve_file(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    // Relative paths point into the selected worksheet drop folder.
    let resolved = if path.is_absolute() {
        path
    } else {
        match state.workspace.as_ref() {
            Some(ws) => ws.join(&path),
            None => path,
        }
    };

    match read_worksheet(&resolved) {
        Ok(text) => {
            let problems = mathocr::extract_and_solve(&text);
            ok(&req.id, problems_result(&problems))
        }
        Err(e) => err(&req.id, "file_read_failed", format!("{e:?}"), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "mathOcr.solveText" => Some(handle_solve_text(req)),
        "mathOcr.solveFile" => Some(handle_solve_file(state, req)),
        _ => None,
    }
}
