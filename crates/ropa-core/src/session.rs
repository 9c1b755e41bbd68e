//! Per-user session context.
//!
//! Holds everything one wardrobe session owns: the gate flag, the tag store,
//! the image store and the last submitted question. Each user action maps to
//! one handler method; nothing lives in ambient global state.

use crate::error::{RopaError, UploadError};
use crate::gate::{AccessGate, GateOutcome};
use crate::llm::{Advisor, Tagger};
use crate::store::{ImageStore, TagStore};
use crate::types::{ItemId, UploadedImage};

/// Progress of an upload batch, reported after each file.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadProgress<'a> {
    /// Files finished so far (1-based)
    pub processed: usize,
    /// Files in the batch
    pub total: usize,
    /// Item just finished
    pub item: &'a ItemId,
    /// Whether a model call was made for it
    pub tagged: bool,
}

/// Outcome of a completed upload batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSummary {
    /// Items tagged by a model call in this batch
    pub tagged: Vec<ItemId>,
    /// Items that already had tags; only their photo was stored
    pub reused: Vec<ItemId>,
}

/// One user's wardrobe session.
#[derive(Debug)]
pub struct Session {
    gate: AccessGate,
    authenticated: bool,
    tags: TagStore,
    images: ImageStore,
    last_question: Option<String>,
}

impl Session {
    /// Create an empty, locked session.
    pub fn new(gate: AccessGate) -> Self {
        Self {
            gate,
            authenticated: false,
            tags: TagStore::new(),
            images: ImageStore::new(),
            last_question: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Try a password. Unlocking is one-way: once granted, later calls
    /// return `Granted` without comparing.
    pub fn authenticate(&mut self, candidate: &str) -> GateOutcome {
        if self.authenticated {
            return GateOutcome::Granted;
        }
        let outcome = self.gate.check(candidate);
        match outcome {
            GateOutcome::Granted => {
                tracing::info!("Session unlocked");
                self.authenticated = true;
            }
            GateOutcome::Denied => tracing::warn!("Rejected password attempt"),
            GateOutcome::Empty => {}
        }
        outcome
    }

    pub fn tags(&self) -> &TagStore {
        &self.tags
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn last_question(&self) -> Option<&str> {
        self.last_question.as_deref()
    }

    /// Process uploaded photos strictly one at a time, in order.
    ///
    /// Items without a tag entry are tagged first; every photo is then stored
    /// (replacing any earlier photo with the same id). The first tagging
    /// failure stops the batch: earlier items keep their results and the
    /// failed item gets neither tags nor a stored photo.
    pub async fn upload<F>(
        &mut self,
        files: Vec<UploadedImage>,
        tagger: &Tagger,
        mut on_progress: F,
    ) -> crate::Result<UploadSummary>
    where
        F: FnMut(UploadProgress<'_>),
    {
        self.ensure_unlocked()?;
        let total = files.len();
        let mut summary = UploadSummary::default();

        for (index, file) in files.into_iter().enumerate() {
            let id = ItemId::from_file_name(&file.file_name)
                .ok_or_else(|| UploadError::InvalidName(file.file_name.clone()))?;

            let needs_tags = !self.tags.contains(&id);
            if needs_tags {
                let record = tagger.tag(&file).await.map_err(|source| {
                    tracing::error!(item = %id, "Tagging failed: {source}");
                    UploadError::Tagging {
                        item: id.to_string(),
                        source,
                    }
                })?;
                tracing::info!(item = %id, "Tagged");
                self.tags.insert(id.clone(), record);
                summary.tagged.push(id.clone());
            } else {
                tracing::debug!(item = %id, "Already tagged, storing photo only");
                summary.reused.push(id.clone());
            }

            if let Some(previous) = self.images.insert(id.clone(), file) {
                tracing::debug!(item = %id, previous = %previous.file_name, "Replaced photo");
            }

            on_progress(UploadProgress {
                processed: index + 1,
                total,
                item: &id,
                tagged: needs_tags,
            });
        }

        Ok(summary)
    }

    /// Merge a wardrobe file into the tag store. On error nothing changes.
    pub fn import_wardrobe(&mut self, bytes: &[u8]) -> crate::Result<usize> {
        self.ensure_unlocked()?;
        let merged = self.tags.import(bytes)?;
        tracing::info!(merged, total = self.tags.len(), "Wardrobe imported");
        Ok(merged)
    }

    /// The tag store as pretty-printed JSON.
    pub fn export_wardrobe(&self) -> crate::Result<String> {
        self.ensure_unlocked()?;
        Ok(self.tags.to_pretty_json()?)
    }

    /// Ask a question about the wardrobe.
    ///
    /// Returns `Ok(None)` without calling the model when the question is
    /// empty or exactly matches the previous submission. The text is compared
    /// as given: `"hola "` after `"hola"` is a new question. The question is
    /// recorded before the call, so a failed call is not retried by
    /// resubmitting the same text.
    pub async fn ask(
        &mut self,
        question: &str,
        advisor: &Advisor,
    ) -> crate::Result<Option<String>> {
        self.ensure_unlocked()?;
        if question.is_empty() || self.last_question.as_deref() == Some(question) {
            return Ok(None);
        }
        self.last_question = Some(question.to_string());

        let answer = advisor.answer(question, &self.tags).await?;
        Ok(Some(answer))
    }

    fn ensure_unlocked(&self) -> crate::Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            tracing::warn!("Rejected action on a locked session");
            Err(RopaError::Locked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaggingConfig;
    use crate::error::{LlmError, TagError};
    use crate::gallery::{Gallery, ImageSource};
    use crate::llm::provider::mock::MockProvider;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;
    use std::sync::Arc;

    const RED_JACKET: &str = r#"{"categoria":"Casual","tipo":"Campera","color":"Rojo","temperatura":"5°C a 15°C","clima":"Frío"}"#;

    fn jpeg(name: &str, shade: u8) -> UploadedImage {
        let mut buf = Cursor::new(Vec::new());
        let mut img = image::RgbImage::new(32, 32);
        img.pixels_mut().for_each(|p| *p = image::Rgb([shade, 0, 0]));
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Jpeg)
            .unwrap();
        UploadedImage::new(name, buf.into_inner())
    }

    fn unlocked() -> Session {
        let mut session = Session::new(AccessGate::new("pw"));
        assert_eq!(session.authenticate("pw"), GateOutcome::Granted);
        session
    }

    fn tagger(provider: &Arc<MockProvider>) -> Tagger {
        Tagger::new(provider.clone(), &TaggingConfig::default())
    }

    #[test]
    fn test_gate_flag_one_way() {
        let mut session = Session::new(AccessGate::new("pw"));
        assert_eq!(session.authenticate(""), GateOutcome::Empty);
        assert_eq!(session.authenticate("nope"), GateOutcome::Denied);
        assert!(!session.is_authenticated());

        assert_eq!(session.authenticate("pw"), GateOutcome::Granted);
        assert!(session.is_authenticated());

        // Bypassed once unlocked
        assert_eq!(session.authenticate("anything"), GateOutcome::Granted);
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_red_jacket_example() {
        let provider = Arc::new(MockProvider::text(RED_JACKET));
        let mut session = unlocked();

        let summary = session
            .upload(vec![jpeg("red_jacket.jpg", 200)], &tagger(&provider), |_| {})
            .await
            .unwrap();
        assert_eq!(summary.tagged, vec![ItemId::from("red_jacket")]);

        let id = ItemId::from("red_jacket");
        let record = session.tags().get(&id).unwrap();
        assert_eq!(serde_json::to_string(record).unwrap(), RED_JACKET);

        let cells = Gallery::new(3, 4).cells(session.tags(), session.images());
        assert_eq!(
            cells[0].caption(),
            "red_jacket: Casual | Campera | Rojo | 5°C a 15°C | Frío"
        );
        assert!(matches!(cells[0].image, ImageSource::Uploaded(_)));
    }

    #[tokio::test]
    async fn test_reupload_skips_tagging_but_updates_photo() {
        let provider = Arc::new(MockProvider::text(RED_JACKET));
        let tagger = tagger(&provider);
        let mut session = unlocked();

        session
            .upload(vec![jpeg("red_jacket.jpg", 10)], &tagger, |_| {})
            .await
            .unwrap();
        let second = jpeg("red_jacket.jpg", 250);
        let summary = session
            .upload(vec![second.clone()], &tagger, |_| {})
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(summary.reused, vec![ItemId::from("red_jacket")]);
        assert_eq!(
            session.images().get(&ItemId::from("red_jacket")),
            Some(&second)
        );
    }

    #[tokio::test]
    async fn test_imported_item_gets_photo_without_model_call() {
        let provider = Arc::new(MockProvider::text(RED_JACKET));
        let mut session = unlocked();
        let file = format!(r#"{{"red_jacket": {RED_JACKET}}}"#);
        session.import_wardrobe(file.as_bytes()).unwrap();

        let cells = Gallery::new(3, 4).cells(session.tags(), session.images());
        assert_eq!(cells[0].image, ImageSource::Placeholder);

        session
            .upload(vec![jpeg("red_jacket.jpg", 1)], &tagger(&provider), |_| {})
            .await
            .unwrap();
        assert_eq!(provider.call_count(), 0);
        let cells = Gallery::new(3, 4).cells(session.tags(), session.images());
        assert!(matches!(cells[0].image, ImageSource::Uploaded(_)));
    }

    #[tokio::test]
    async fn test_same_base_name_in_batch_last_photo_wins() {
        let provider = Arc::new(MockProvider::text(RED_JACKET));
        let mut session = unlocked();
        let later = jpeg("invierno/remera.jpeg", 99);

        let summary = session
            .upload(
                vec![jpeg("verano/remera.jpg", 1), later.clone()],
                &tagger(&provider),
                |_| {},
            )
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(summary.tagged, vec![ItemId::from("remera")]);
        assert_eq!(summary.reused, vec![ItemId::from("remera")]);
        assert_eq!(session.tags().len(), 1);
        assert_eq!(session.images().get(&ItemId::from("remera")), Some(&later));
    }

    #[tokio::test]
    async fn test_progress_reported_per_file() {
        let provider = Arc::new(MockProvider::text(RED_JACKET));
        let mut session = unlocked();
        let mut seen = Vec::new();

        session
            .upload(
                vec![jpeg("a.jpg", 1), jpeg("b.jpg", 2), jpeg("c.jpg", 3)],
                &tagger(&provider),
                |p| seen.push((p.processed, p.total, p.item.to_string())),
            )
            .await
            .unwrap();

        assert_eq!(
            seen,
            vec![
                (1, 3, "a".to_string()),
                (2, 3, "b".to_string()),
                (3, 3, "c".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_reply_stops_batch_and_leaves_item_untagged() {
        let provider = Arc::new(MockProvider::replying(vec![
            Ok(RED_JACKET.to_string()),
            Ok("no es json".to_string()),
            Ok(RED_JACKET.to_string()),
        ]));
        let tagger = tagger(&provider);
        let mut session = unlocked();

        let err = session
            .upload(
                vec![jpeg("a.jpg", 1), jpeg("b.jpg", 2), jpeg("c.jpg", 3)],
                &tagger,
                |_| {},
            )
            .await
            .unwrap_err();

        match err {
            RopaError::Upload(UploadError::Tagging { item, source }) => {
                assert_eq!(item, "b");
                assert!(matches!(source, TagError::InvalidReply { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(session.tags().contains(&ItemId::from("a")));
        assert!(!session.tags().contains(&ItemId::from("b")));
        assert!(session.images().get(&ItemId::from("b")).is_none());
        assert!(!session.tags().contains(&ItemId::from("c")));
        assert_eq!(provider.call_count(), 2);

        // Uploading the same name again retries the model call
        session
            .upload(vec![jpeg("b.jpg", 2)], &tagger, |_| {})
            .await
            .unwrap();
        assert!(session.tags().contains(&ItemId::from("b")));
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_api_failure_surfaces() {
        let provider = Arc::new(MockProvider::replying(vec![Err(401)]));
        let mut session = unlocked();
        let err = session
            .upload(vec![jpeg("a.jpg", 1)], &tagger(&provider), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RopaError::Upload(UploadError::Tagging {
                source: TagError::Llm(LlmError::Http { status: 401, .. }),
                ..
            })
        ));
        assert!(session.tags().is_empty());
    }

    #[tokio::test]
    async fn test_export_then_import_is_identity() {
        let provider = Arc::new(MockProvider::text(RED_JACKET));
        let mut session = unlocked();
        session
            .upload(vec![jpeg("a.jpg", 1), jpeg("b.jpg", 2)], &tagger(&provider), |_| {})
            .await
            .unwrap();

        let before = session.tags().clone();
        let exported = session.export_wardrobe().unwrap();
        session.import_wardrobe(exported.as_bytes()).unwrap();
        assert_eq!(session.tags(), &before);
    }

    #[tokio::test]
    async fn test_ask_deduplicates_and_skips_empty() {
        let provider = Arc::new(MockProvider::text("Usá la campera."));
        let advisor = Advisor::new(provider.clone(), 0.3);
        let mut session = unlocked();

        assert_eq!(session.ask("", &advisor).await.unwrap(), None);
        assert_eq!(provider.call_count(), 0);

        let first = session.ask("¿Qué me pongo?", &advisor).await.unwrap();
        assert_eq!(first.as_deref(), Some("Usá la campera."));
        let repeat = session.ask("¿Qué me pongo?", &advisor).await.unwrap();
        assert_eq!(repeat, None);
        assert_eq!(provider.call_count(), 1);

        session.ask("¿Y si llueve?", &advisor).await.unwrap();
        session.ask("¿Qué me pongo?", &advisor).await.unwrap();
        assert_eq!(provider.call_count(), 3);
        assert_eq!(session.last_question(), Some("¿Qué me pongo?"));
    }

    #[tokio::test]
    async fn test_failed_question_not_resent_on_repeat() {
        let provider = Arc::new(MockProvider::replying(vec![Err(503)]));
        let advisor = Advisor::new(provider.clone(), 0.3);
        let mut session = unlocked();

        assert!(session.ask("hola", &advisor).await.is_err());
        assert_eq!(session.ask("hola", &advisor).await.unwrap(), None);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_ask_compares_text_exactly() {
        let provider = Arc::new(MockProvider::text("Sí."));
        let advisor = Advisor::new(provider.clone(), 0.3);
        let mut session = unlocked();

        assert!(session.ask("hola", &advisor).await.unwrap().is_some());
        assert!(session.ask("hola ", &advisor).await.unwrap().is_some());
        assert!(session.ask("   ", &advisor).await.unwrap().is_some());
        assert_eq!(session.ask("   ", &advisor).await.unwrap(), None);
        assert_eq!(provider.call_count(), 3);
        assert_eq!(session.last_question(), Some("   "));
    }

    #[tokio::test]
    async fn test_locked_session_refuses_every_handler() {
        let provider = Arc::new(MockProvider::text(RED_JACKET));
        let advisor = Advisor::new(provider.clone(), 0.3);
        let mut session = Session::new(AccessGate::new("pw"));
        let file = format!(r#"{{"red_jacket": {RED_JACKET}}}"#);

        let upload = session
            .upload(vec![jpeg("a.jpg", 1)], &tagger(&provider), |_| {})
            .await;
        assert!(matches!(upload, Err(RopaError::Locked)));
        assert!(matches!(
            session.import_wardrobe(file.as_bytes()),
            Err(RopaError::Locked)
        ));
        assert!(matches!(session.export_wardrobe(), Err(RopaError::Locked)));
        assert!(matches!(
            session.ask("hola", &advisor).await,
            Err(RopaError::Locked)
        ));

        assert_eq!(provider.call_count(), 0);
        assert!(session.tags().is_empty());
        assert!(session.images().is_empty());
        assert_eq!(session.last_question(), None);

        // A wrong password keeps it locked
        session.authenticate("nope");
        assert!(matches!(session.export_wardrobe(), Err(RopaError::Locked)));

        session.authenticate("pw");
        assert_eq!(session.import_wardrobe(file.as_bytes()).unwrap(), 1);
        assert!(session.ask("hola", &advisor).await.unwrap().is_some());
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_bad_import_keeps_store() {
        let mut session = unlocked();
        let file = format!(r#"{{"red_jacket": {RED_JACKET}}}"#);
        session.import_wardrobe(file.as_bytes()).unwrap();
        let before = session.tags().clone();

        assert!(session.import_wardrobe(b"not json").is_err());
        assert_eq!(session.tags(), &before);
    }
}
