use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use uuid::Uuid;

use crate::core::{Asset, ExportError, ExportResult, Service};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Pdf,
    Png { ppi: u32 },
}

impl OutputKind {
    fn extension(&self) -> &'static str {
        match self {
            OutputKind::Pdf => "pdf",
            OutputKind::Png { .. } => "png",
        }
    }
}

/// Runs the Typst CLI on generated sources inside a scratch directory.
#[derive(Debug, Clone)]
pub struct TypstCompiler {
    binary: String,
    temp_dir: PathBuf,
}

impl TypstCompiler {
    pub fn new(binary: impl Into<String>, temp_dir: impl Into<PathBuf>) -> Self {
        TypstCompiler {
            binary: binary.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// Fails with `ServiceUnavailable` when the binary cannot be executed.
    pub async fn probe(&self) -> ExportResult<String> {
        let binary = self.binary.clone();
        let output = tokio::task::spawn_blocking(move || Command::new(&binary).arg("--version").output())
            .await?
            .map_err(|e| ExportError::unavailable(Service::Pdf, format!("{}: {}", self.binary, e)))?;

        if !output.status.success() {
            return Err(ExportError::unavailable(
                Service::Pdf,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!(%version, "Typst compiler available");
        Ok(version)
    }

    pub async fn compile(&self, source: &str, assets: &[Asset], kind: OutputKind) -> ExportResult<Vec<u8>> {
        let work_dir = self.temp_dir.join(format!("society_reports_{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&work_dir).await?;

        let result = self.compile_in(&work_dir, source, assets, kind).await;

        // Scratch files never outlive the call, whatever the outcome.
        if let Err(e) = tokio::fs::remove_dir_all(&work_dir).await {
            tracing::warn!(dir = %work_dir.display(), error = %e, "Could not remove scratch directory");
        }

        result
    }

    async fn compile_in(
        &self,
        work_dir: &Path,
        source: &str,
        assets: &[Asset],
        kind: OutputKind,
    ) -> ExportResult<Vec<u8>> {
        let typ_path = work_dir.join("main.typ");
        let out_path = work_dir.join(format!("main.{}", kind.extension()));

        tokio::fs::write(&typ_path, source).await?;
        for asset in assets {
            tokio::fs::write(work_dir.join(&asset.name), &asset.bytes).await?;
        }

        let mut command = Command::new(&self.binary);
        command.arg("compile").arg("--root").arg(work_dir);
        if let OutputKind::Png { ppi } = kind {
            command.arg("--format").arg("png").arg("--ppi").arg(ppi.to_string());
        }
        command.arg(&typ_path).arg(&out_path);

        tracing::debug!(?kind, dir = %work_dir.display(), "Compiling Typst document");

        let output: Output = tokio::task::spawn_blocking(move || command.output())
            .await?
            .map_err(|e| ExportError::unavailable(Service::Pdf, e.to_string()))?;

        if !output.status.success() {
            return Err(ExportError::Generation(format!(
                "Typst compilation failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(tokio::fs::read(&out_path).await?)
    }
}
