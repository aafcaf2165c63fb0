use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::write::SimpleFileOptions;

use cry_relay::domain::{RunConclusion, RunId, RunStatus, WorkflowRun};

pub fn zip_with(entries: &[(&str, &str)]) -> Bytes {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }
    Bytes::from(cursor.into_inner())
}

pub fn hungry_archive() -> Bytes {
    zip_with(&[("result.json", r#"{"prediction":"hungry","confidence":0.87}"#)])
}

pub fn completed_run(id: u64, conclusion: RunConclusion) -> WorkflowRun {
    WorkflowRun {
        run_id: RunId::new(id),
        status: RunStatus::Completed,
        conclusion: Some(conclusion),
        started_at: None,
    }
}
