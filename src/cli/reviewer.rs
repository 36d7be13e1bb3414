//! Terminal reviewer: shows a candidate, opens its media and asks for a
//! judgment.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use console::{style, Term};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::models::{Judgment, SuggestedAction};
use crate::domain::ports::{Review, Reviewer, ScoredCandidate};
use crate::infrastructure::remote::RemoteClient;

pub struct TerminalReviewer {
    client: Arc<RemoteClient>,
    scratch: PathBuf,
    image_viewer: Vec<String>,
    video_viewer: Vec<String>,
    term: Term,
}

impl TerminalReviewer {
    /// Media files are downloaded into `scratch`, which the caller owns.
    pub fn new(
        client: Arc<RemoteClient>,
        scratch: impl Into<PathBuf>,
        image_viewer: Vec<String>,
        video_viewer: Vec<String>,
    ) -> Self {
        Self {
            client,
            scratch: scratch.into(),
            image_viewer,
            video_viewer,
            term: Term::stdout(),
        }
    }

    fn print_header(&self, scored: &ScoredCandidate) -> Result<()> {
        let candidate = &scored.candidate;
        let created = candidate
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown date".to_string());

        let header = format!(
            "{} · Image: #{} · {} tags · {} · {}x{}",
            scored.decision_count,
            candidate.id,
            scored.tags.len(),
            created,
            candidate.file.width,
            candidate.file.height
        );
        self.term.write_line(&style(header).dim().to_string())?;
        Ok(())
    }

    fn print_likelihood(&self, scored: &ScoredCandidate) -> Result<()> {
        let likelihood = match (scored.predicted, scored.difference()) {
            (Some(predicted), Some(difference)) => format!(
                "Likelihood: {:.2}% ({:+.2}%)",
                predicted * 100.0,
                difference * 100.0
            ),
            _ => "Likelihood: unknown".to_string(),
        };

        let line = format!("{likelihood} · {}", scored.tags.join(", "));
        let width = usize::from(self.term.size().1).saturating_sub(1).max(20);
        let line = console::truncate_str(&line, width, "…");
        self.term.write_line(&line)?;
        Ok(())
    }

    fn judgment_prompt(suggestion: SuggestedAction) -> String {
        let upvote = format!("{}pvote", style("U").underlined());
        let downvote = format!("{}ownvote", style("d").underlined());
        let (upvote, downvote) = match suggestion {
            SuggestedAction::Favor => (style(upvote).green().to_string(), downvote),
            SuggestedAction::Disfavor => (upvote, style(downvote).green().to_string()),
            SuggestedAction::None => (upvote, downvote),
        };
        format!("What do you do with this image? {upvote} or {downvote}? ")
    }

    /// Ask until one of `choices` is typed; `None` on an empty answer.
    async fn ask(&self, prompt: &str, choices: &[&str]) -> Result<Option<String>> {
        loop {
            self.term.write_str(prompt)?;
            let term = self.term.clone();
            let line = tokio::task::spawn_blocking(move || term.read_line())
                .await
                .context("Prompt task failed")?
                .context("Failed to read answer")?;

            let answer = line.trim().to_lowercase();
            if answer.is_empty() {
                return Ok(None);
            }
            if choices.contains(&answer.as_str()) {
                return Ok(Some(answer));
            }
        }
    }

    async fn open(command: &[String], path: &Path) {
        let Some((program, args)) = command.split_first() else {
            return;
        };

        match Command::new(program).args(args).arg(path).status().await {
            Ok(status) if !status.success() => {
                warn!(program = %program, %status, "viewer exited with an error");
            }
            Ok(_) => {}
            Err(err) => warn!(program = %program, error = %err, "failed to launch viewer"),
        }
    }

    async fn discard(path: Option<&PathBuf>) {
        if let Some(path) = path {
            if let Err(err) = tokio::fs::remove_file(path).await {
                debug!(path = %path.display(), error = %err, "failed to remove media file");
            }
        }
    }
}

#[async_trait]
impl Reviewer for TerminalReviewer {
    async fn review(&mut self, scored: &ScoredCandidate) -> Result<Review> {
        let candidate = &scored.candidate;
        self.term.clear_screen()?;
        self.print_header(scored)?;

        let Some(url) = candidate.media_url() else {
            return Ok(Review::Skip);
        };

        let media = match self.client.download(candidate.id, url, &self.scratch).await {
            Ok(path) => Some(path),
            Err(err) => {
                warn!(post_id = candidate.id, error = %format!("{err:#}"), "media download failed");
                None
            }
        };

        if candidate.file.is_video() {
            let prompt = "This is a video, open it with the video player? (y/n) ";
            match self.ask(prompt, &["y", "n"]).await?.as_deref() {
                None => {
                    Self::discard(media.as_ref()).await;
                    return Ok(Review::Quit);
                }
                Some("n") => {
                    Self::discard(media.as_ref()).await;
                    return Ok(Review::Skip);
                }
                Some(_) => {
                    if let Some(path) = &media {
                        Self::open(&self.video_viewer, path).await;
                    }
                }
            }
        } else if let Some(path) = &media {
            Self::open(&self.image_viewer, path).await;
        }

        self.term.write_line("")?;
        self.print_likelihood(scored)?;

        let prompt = Self::judgment_prompt(scored.suggestion);
        let answer = self.ask(&prompt, &["u", "d"]).await?;
        Self::discard(media.as_ref()).await;

        Ok(match answer.as_deref() {
            None => Review::Quit,
            Some("u") => Review::Judged(Judgment::Accept),
            Some(_) => Review::Judged(Judgment::Reject),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_both_answers() {
        console::set_colors_enabled(false);
        let prompt = TerminalReviewer::judgment_prompt(SuggestedAction::Favor);
        assert!(prompt.contains("Upvote"));
        assert!(prompt.contains("downvote"));
    }
}
