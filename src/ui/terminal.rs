//! [`Ui`] on a terminal
//!
//! Fragments are written to `<output dir>/<region>.html`, or to stdout when no output
//! directory is configured. Alerts and prompts use stdout and stdin.
use super::{DeleteScope, Region, Ui};
use maud::Markup;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct TerminalUi {
    output_dir: Option<PathBuf>,
    redirected_to: Option<String>,
}

impl TerminalUi {
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        TerminalUi {
            output_dir,
            redirected_to: None,
        }
    }

    /// The location of the last redirect, if any
    pub fn redirected_to(&self) -> Option<&str> {
        self.redirected_to.as_deref()
    }

    fn region_path(dir: &Path, region: Region) -> PathBuf {
        dir.join(format!("{}.html", region))
    }

    fn write_region(&self, region: Region, content: &str) -> io::Result<()> {
        match &self.output_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                fs::write(Self::region_path(dir, region), content)
            }
            None => {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                writeln!(out, "<!-- {} -->", region)?;
                writeln!(out, "{}", content)
            }
        }
    }

    fn ask(&self, question: &str) -> Option<String> {
        println!("{}", question);
        print!("> ");

        if let Err(e) = io::stdout().flush() {
            log::warn!("Failed to flush stdout: {}", e);
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) => None,
            Ok(_) => Some(answer),
            Err(e) => {
                log::error!("Failed to read answer: {}", e);
                None
            }
        }
    }
}

impl Ui for TerminalUi {
    fn render(&mut self, region: Region, markup: Markup) {
        log::trace!("Rendering region {}", region);

        if let Err(e) = self.write_region(region, &markup.into_string()) {
            log::error!("Failed to render region {}: {}", region, e);
        }
    }

    fn clear(&mut self, region: Region) {
        if let Some(dir) = &self.output_dir {
            let path = Self::region_path(dir, region);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => log::error!("Failed to clear region {}: {}", region, e),
            }
        }
    }

    fn alert(&mut self, message: &str) {
        println!("{}", message);
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.ask(&format!("{} [o/N]", question))
            .map(|answer| is_yes(&answer))
            .unwrap_or(false)
    }

    fn choose_delete_scope(&mut self, question: &str) -> Option<DeleteScope> {
        self.ask(&format!(
            "{}\n  s: toute la série\n  o: cette occurrence uniquement\n  autre: annuler",
            question
        ))
        .and_then(|answer| parse_delete_scope(&answer))
    }

    fn redirect(&mut self, location: &str) {
        println!("Redirection vers {}", location);
        self.redirected_to = Some(location.to_string());
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "o" | "oui" | "y" | "yes"
    )
}

fn parse_delete_scope(answer: &str) -> Option<DeleteScope> {
    match answer.trim().to_lowercase().as_str() {
        "s" | "série" | "serie" => Some(DeleteScope::Series),
        "o" | "occurrence" => Some(DeleteScope::Occurrence),
        _ => None,
    }
}
