use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use handsign_knear::{encode_pretty, Exemplar, KNear, KnearError, Prediction, TrainingSet};
use handsign_landmark::{vectorize, Hand};
use handsign_persist::{BoxedPersister, PersistError, Persister};

use crate::config::SessionConfig;
use crate::error::SessionError;

#[derive(Default)]
struct SaveState {
    /// The in-memory set holds exemplars the slot has not seen.
    dirty: bool,
    last_error: Option<PersistError>,
}

/// A gesture recognition session.
///
/// Thread-safe: all methods take `&self` and can be called concurrently.
pub struct Session {
    set: RwLock<TrainingSet>,
    knn: KNear,
    persister: Option<BoxedPersister>,
    save: Mutex<SaveState>,
}

impl Session {
    /// Creates an empty session saving to `persister`.
    ///
    /// Nothing is read from the slot; see [`Session::open`] and
    /// [`Session::restore`].
    pub fn new(cfg: SessionConfig, persister: BoxedPersister) -> Self {
        Self::build(cfg, Some(persister))
    }

    /// Creates an empty session without durable storage.
    pub fn in_memory(cfg: SessionConfig) -> Self {
        Self::build(cfg, None)
    }

    /// Creates a session and seeds it from `persister`.
    ///
    /// An unreadable slot is logged and the session starts empty.
    pub fn open(cfg: SessionConfig, persister: BoxedPersister) -> Self {
        let session = Self::new(cfg, persister);
        if let Err(e) = session.restore() {
            warn!("starting with an empty training set: {}", e);
        }
        session
    }

    fn build(cfg: SessionConfig, persister: Option<BoxedPersister>) -> Self {
        let cfg = cfg.with_defaults();
        Self {
            set: RwLock::new(TrainingSet::with_dimension(cfg.dimension)),
            knn: KNear::new(cfg.k),
            persister,
            save: Mutex::new(SaveState::default()),
        }
    }

    // ── training ───────────────────────────────────────────

    /// Records `hand` as an example of `label` and saves the full set.
    ///
    /// Returns the new number of exemplars. A failed save does not undo
    /// the append; see [`Session::last_persist_error`].
    pub fn learn(&self, hand: &Hand, label: &str) -> Result<usize, SessionError> {
        self.learn_vector(vectorize(hand), label)
    }

    /// Records every hand in a frame as an example of `label`, with a
    /// single save. Either all hands are recorded or none.
    pub fn learn_all(&self, hands: &[Hand], label: &str) -> Result<usize, SessionError> {
        if hands.is_empty() {
            return Ok(self.len());
        }
        let items = hands
            .iter()
            .map(|h| (vectorize(h), label.to_string()))
            .collect();

        let size = {
            let mut set = self.set.write();
            set.extend(items)?;
            set.len()
        };
        debug!("learned {} x {:?} (size={})", hands.len(), label, size);

        self.mark_dirty();
        let _ = self.save_snapshot();
        Ok(size)
    }

    /// Appends a raw feature vector and saves the full set.
    pub fn learn_vector(&self, vector: Vec<f32>, label: &str) -> Result<usize, SessionError> {
        let size = {
            let mut set = self.set.write();
            set.add(vector, label)?;
            set.len()
        };
        debug!("learned {:?} (size={})", label, size);

        self.mark_dirty();
        let _ = self.save_snapshot();
        Ok(size)
    }

    // ── classification ─────────────────────────────────────

    /// Returns the predicted label for a feature vector.
    pub fn classify(&self, query: &[f32]) -> Result<String, SessionError> {
        Ok(self.knn.classify(query, &self.set.read())?)
    }

    /// Returns the full vote outcome for a feature vector.
    pub fn predict(&self, query: &[f32]) -> Result<Prediction, SessionError> {
        Ok(self.knn.predict(query, &self.set.read())?)
    }

    pub fn classify_hand(&self, hand: &Hand) -> Result<String, SessionError> {
        self.classify(&vectorize(hand))
    }

    pub fn predict_hand(&self, hand: &Hand) -> Result<Prediction, SessionError> {
        self.predict(&vectorize(hand))
    }

    /// Handles one detector frame.
    ///
    /// Only the first hand is classified. Returns `None` when the frame has
    /// no hand or the session has not been trained yet.
    pub fn on_frame(&self, hands: &[Hand]) -> Result<Option<Prediction>, SessionError> {
        let Some(hand) = hands.first() else {
            return Ok(None);
        };
        let query = vectorize(hand);

        let set = self.set.read();
        if set.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.knn.predict(&query, &set)?))
    }

    // ── import / export ────────────────────────────────────

    /// Returns every exemplar in insertion order.
    pub fn export(&self) -> Vec<Exemplar> {
        self.set.read().export()
    }

    /// Serializes the training set as a model file.
    pub fn export_json(&self) -> Result<Vec<u8>, SessionError> {
        let snapshot = self.export();
        Ok(encode_pretty(&snapshot)?)
    }

    /// Writes the training set to another persister, such as a model file.
    pub fn export_to(&self, target: &dyn Persister) -> Result<usize, SessionError> {
        let snapshot = self.export();
        target.save(&snapshot)?;
        info!("exported {} exemplars to {}", snapshot.len(), target.location());
        Ok(snapshot.len())
    }

    /// Replaces the training set with a model file's contents and saves it.
    ///
    /// Malformed data leaves the current set untouched.
    pub fn load(&self, data: &[u8]) -> Result<usize, SessionError> {
        let size = self.set.write().load(data)?;
        info!("loaded {} exemplars", size);

        self.mark_dirty();
        let _ = self.save_snapshot();
        Ok(size)
    }

    /// Replaces the training set with the contents of `source` and saves it.
    pub fn import_from(&self, source: &dyn Persister) -> Result<usize, SessionError> {
        let records = source.load()?.ok_or_else(|| {
            KnearError::Load(format!("{}: no training data", source.location()))
        })?;
        let size = self.set.write().replace(records)?;
        info!("imported {} exemplars from {}", size, source.location());

        self.mark_dirty();
        let _ = self.save_snapshot();
        Ok(size)
    }

    /// Re-reads the session's own slot, replacing the training set.
    ///
    /// An empty slot leaves the set as it is. Returns the number of
    /// exemplars afterwards.
    pub fn restore(&self) -> Result<usize, SessionError> {
        let Some(persister) = &self.persister else {
            return Ok(self.len());
        };
        let Some(records) = persister.load()? else {
            debug!("no saved training data at {}", persister.location());
            return Ok(self.len());
        };

        let size = self.set.write().replace(records)?;
        self.save.lock().dirty = false;
        info!("restored {} exemplars from {}", size, persister.location());
        Ok(size)
    }

    // ── persistence ────────────────────────────────────────

    /// Saves the full training set now, regardless of the dirty flag.
    pub fn flush(&self) -> Result<(), SessionError> {
        Ok(self.save_snapshot()?)
    }

    /// True if the slot is behind the in-memory set.
    pub fn is_dirty(&self) -> bool {
        self.save.lock().dirty
    }

    /// Returns the error from the most recent failed save, cleared by the
    /// next successful one.
    pub fn last_persist_error(&self) -> Option<PersistError> {
        self.save.lock().last_error.clone()
    }

    fn mark_dirty(&self) {
        if self.persister.is_some() {
            self.save.lock().dirty = true;
        }
    }

    fn save_snapshot(&self) -> Result<(), PersistError> {
        let Some(persister) = &self.persister else {
            return Ok(());
        };

        // Snapshot while holding the save lock so saves land in order.
        let mut state = self.save.lock();
        let snapshot = self.set.read().export();

        match persister.save(&snapshot) {
            Ok(()) => {
                state.dirty = false;
                state.last_error = None;
                debug!("saved {} exemplars to {}", snapshot.len(), persister.location());
                Ok(())
            }
            Err(e) => {
                warn!("save to {} failed: {}", persister.location(), e);
                state.dirty = true;
                state.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    // ── inspection ─────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.set.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.read().is_empty()
    }

    /// Returns the vector length this session accepts.
    pub fn dimension(&self) -> Option<usize> {
        self.set.read().dimension()
    }

    pub fn k(&self) -> usize {
        self.knn.k()
    }

    /// Where the durable slot lives, if the session has one.
    pub fn storage_location(&self) -> Option<String> {
        self.persister.as_ref().map(|p| p.location())
    }

    /// Distinct labels in first-seen order, with their exemplar counts.
    pub fn labels(&self) -> Vec<(String, usize)> {
        let set = self.set.read();
        let mut out: Vec<(String, usize)> = Vec::new();
        for e in set.iter() {
            match out.iter_mut().find(|(l, _)| *l == e.label) {
                Some((_, n)) => *n += 1,
                None => out.push((e.label.clone(), 1)),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use handsign_landmark::{Point3, HAND_DIMENSION, LANDMARK_COUNT};
    use handsign_persist::{MemorySlot, PersistResult};

    use super::*;

    fn flat_hand(v: f32) -> Hand {
        Hand::new([Point3::new(v, v, v); LANDMARK_COUNT])
    }

    /// Slot whose saves fail while `failing` is set.
    struct FlakySlot {
        inner: MemorySlot,
        failing: Arc<AtomicBool>,
    }

    impl Persister for FlakySlot {
        fn save(&self, exemplars: &[Exemplar]) -> PersistResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PersistError::Storage("disk full".into()));
            }
            self.inner.save(exemplars)
        }

        fn load(&self) -> PersistResult<Option<Vec<Exemplar>>> {
            self.inner.load()
        }

        fn location(&self) -> String {
            "flaky".into()
        }
    }

    #[test]
    fn monkey_horse_dragon() {
        let session = Session::in_memory(SessionConfig::default().with_k(1));
        session.learn(&flat_hand(0.0), "Monkey").unwrap();
        session.learn(&flat_hand(1.0), "Horse").unwrap();
        session.learn(&flat_hand(2.0), "Dragon").unwrap();

        assert_eq!(session.classify(&[0.1; 63]).unwrap(), "Monkey");
        assert_eq!(session.classify(&[1.9; 63]).unwrap(), "Dragon");

        let k3 = Session::in_memory(SessionConfig::default());
        k3.load(&session.export_json().unwrap()).unwrap();
        assert_eq!(k3.classify(&[0.1; 63]).unwrap(), "Monkey");
        assert_eq!(k3.classify(&[1.9; 63]).unwrap(), "Dragon");
    }

    #[test]
    fn empty_session_not_trained() {
        let session = Session::in_memory(SessionConfig::default());
        let err = session.classify(&[0.0; 63]).unwrap_err();
        assert!(err.is_not_trained(), "got {err}");
        assert_eq!(session.on_frame(&[flat_hand(0.0)]).unwrap(), None);
        assert!(session.storage_location().is_none());
    }

    #[test]
    fn learn_returns_size_and_pins_dimension() {
        let session = Session::in_memory(SessionConfig::default());
        assert_eq!(session.dimension(), Some(HAND_DIMENSION));
        assert_eq!(session.learn(&flat_hand(0.2), "a").unwrap(), 1);
        assert_eq!(session.learn(&flat_hand(0.4), "b").unwrap(), 2);

        let err = session.learn_vector(vec![0.0; 50], "c").unwrap_err();
        assert!(err.is_dimension_mismatch());
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn learn_saves_full_set() {
        let slot = MemorySlot::new();
        let session = Session::new(SessionConfig::default(), Box::new(slot.clone()));

        session.learn(&flat_hand(0.0), "a").unwrap();
        session.learn(&flat_hand(1.0), "b").unwrap();

        let saved = slot.load().unwrap().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved, session.export());
        assert!(!session.is_dirty());
        assert_eq!(session.storage_location().as_deref(), Some("memory"));
    }

    #[test]
    fn failed_save_keeps_exemplar_and_retries() {
        let failing = Arc::new(AtomicBool::new(true));
        let slot = MemorySlot::new();
        let session = Session::new(
            SessionConfig::default(),
            Box::new(FlakySlot {
                inner: slot.clone(),
                failing: failing.clone(),
            }),
        );

        assert_eq!(session.learn(&flat_hand(0.0), "a").unwrap(), 1);
        assert_eq!(session.len(), 1);
        assert!(session.is_dirty());
        assert!(matches!(
            session.last_persist_error(),
            Some(PersistError::Storage(_))
        ));
        assert!(slot.load().unwrap().is_none());

        // Still usable for classification.
        assert_eq!(session.classify_hand(&flat_hand(0.0)).unwrap(), "a");

        failing.store(false, Ordering::SeqCst);
        session.learn(&flat_hand(1.0), "b").unwrap();
        assert!(!session.is_dirty());
        assert!(session.last_persist_error().is_none());
        assert_eq!(slot.load().unwrap().unwrap().len(), 2);
    }

    #[test]
    fn flush_retries_explicitly() {
        let failing = Arc::new(AtomicBool::new(true));
        let slot = MemorySlot::new();
        let session = Session::new(
            SessionConfig::default(),
            Box::new(FlakySlot {
                inner: slot.clone(),
                failing: failing.clone(),
            }),
        );
        session.learn(&flat_hand(0.0), "a").unwrap();
        assert!(session.flush().is_err());

        failing.store(false, Ordering::SeqCst);
        session.flush().unwrap();
        assert!(!session.is_dirty());
        assert_eq!(slot.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn open_restores_slot() {
        let slot = MemorySlot::new();
        {
            let first = Session::new(SessionConfig::default(), Box::new(slot.clone()));
            first.learn(&flat_hand(0.3), "Ten").unwrap();
            first.learn(&flat_hand(0.6), "Chi").unwrap();
        }

        let second = Session::open(SessionConfig::default(), Box::new(slot));
        assert_eq!(second.len(), 2);
        assert_eq!(second.classify_hand(&flat_hand(0.58)).unwrap(), "Chi");
        assert!(!second.is_dirty());
    }

    #[test]
    fn open_with_corrupt_slot_starts_empty() {
        let slot = MemorySlot::with_bytes("{not json");
        let session = Session::open(SessionConfig::default(), Box::new(slot));
        assert!(session.is_empty());
        assert!(session.restore().is_err());
    }

    #[test]
    fn restore_rejects_wrong_dimension() {
        let slot = MemorySlot::with_bytes(r#"[{"label":"x","data":[1,2,3]}]"#);
        let session = Session::new(SessionConfig::default(), Box::new(slot));
        assert!(session.restore().is_err());
        assert!(session.is_empty());
    }

    #[test]
    fn load_replaces_and_saves() {
        let slot = MemorySlot::new();
        let session = Session::new(SessionConfig::default(), Box::new(slot.clone()));
        session.learn(&flat_hand(0.0), "old").unwrap();

        let model = encode_pretty(&[
            Exemplar::new("Jin", vec![0.9; 63]),
            Exemplar::new("Ten", vec![0.1; 63]),
        ])
        .unwrap();
        assert_eq!(session.load(&model).unwrap(), 2);

        let labels: Vec<String> = session.labels().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Jin", "Ten"]);
        assert_eq!(slot.load().unwrap().unwrap().len(), 2);
    }

    #[test]
    fn load_malformed_keeps_set() {
        let session = Session::in_memory(SessionConfig::default());
        session.learn(&flat_hand(0.0), "keep").unwrap();
        assert!(session.load(b"[{\"label\":1}]").is_err());
        assert!(session.load(br#"[{"label":"x","data":[1.0]}]"#).is_err());
        assert_eq!(session.len(), 1);
        assert_eq!(session.export()[0].label, "keep");
    }

    #[test]
    fn learn_all_records_every_hand() {
        let slot = MemorySlot::new();
        let session = Session::new(SessionConfig::default(), Box::new(slot.clone()));
        let size = session
            .learn_all(&[flat_hand(0.1), flat_hand(0.2)], "Monkey")
            .unwrap();
        assert_eq!(size, 2);
        assert_eq!(session.labels(), vec![("Monkey".to_string(), 2)]);
        assert_eq!(slot.load().unwrap().unwrap().len(), 2);

        assert_eq!(session.learn_all(&[], "Monkey").unwrap(), 2);
    }

    #[test]
    fn on_frame_uses_first_hand() {
        let session = Session::in_memory(SessionConfig::default().with_k(1));
        session.learn(&flat_hand(0.0), "left").unwrap();
        session.learn(&flat_hand(1.0), "right").unwrap();

        assert_eq!(session.on_frame(&[]).unwrap(), None);

        let p = session
            .on_frame(&[flat_hand(0.9), flat_hand(0.1)])
            .unwrap()
            .unwrap();
        assert_eq!(p.label, "right");
        assert_eq!(p.votes, 1);
    }

    #[test]
    fn labels_in_first_seen_order() {
        let session = Session::in_memory(SessionConfig::default());
        for (v, l) in [(0.0, "b"), (0.1, "a"), (0.2, "b"), (0.3, "c"), (0.4, "a")] {
            session.learn(&flat_hand(v), l).unwrap();
        }
        assert_eq!(
            session.labels(),
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn in_memory_is_never_dirty() {
        let session = Session::in_memory(SessionConfig::default());
        session.learn(&flat_hand(0.0), "a").unwrap();
        assert!(!session.is_dirty());
        session.flush().unwrap();
        assert_eq!(session.restore().unwrap(), 1);
    }

    #[test]
    fn concurrent_classify_and_learn() {
        let session = Arc::new(Session::in_memory(SessionConfig::default().with_k(1)));
        session.learn(&flat_hand(0.0), "seed").unwrap();

        let mut handles = Vec::new();
        for t in 0..4 {
            let s = session.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    if t == 0 {
                        s.learn(&flat_hand(10.0 + i as f32), "far").unwrap();
                    } else {
                        // The seed exemplar is always the nearest neighbor.
                        assert_eq!(s.classify_hand(&flat_hand(0.01)).unwrap(), "seed");
                    }
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(session.len(), 51);
    }
}
