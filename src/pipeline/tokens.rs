//! Bounded pool of dispatch tokens.
//!
//! The pool starts with `capacity` vacant tokens. Dispatching a document takes
//! a token; the processing unit returns it holding the finished document. At
//! most `capacity` documents are therefore in flight, and every finished
//! document comes back to the coordinator through the same channel.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

use crate::error::{Error, Result};

use super::Document;

/// A dispatch token.
#[derive(Debug)]
pub enum Slot {
    /// Free capacity, nothing to merge
    Vacant,
    /// A finished document awaiting merge
    Completed(Box<Document>),
}

/// Handle given to a processing unit for returning its token.
#[derive(Debug, Clone)]
pub struct TokenReturn {
    sender: SyncSender<Slot>,
}

impl TokenReturn {
    /// Hand a finished document back to the coordinator.
    ///
    /// Never blocks: the channel holds exactly as many tokens as exist.
    pub fn complete(&self, document: Document) {
        if self.sender.send(Slot::Completed(Box::new(document))).is_err() {
            log::error!("Coordinator is gone, dropping a finished document");
        }
    }
}

/// The coordinator's side of the pool.
#[derive(Debug)]
pub struct TokenPool {
    capacity: usize,
    sender: SyncSender<Slot>,
    receiver: Receiver<Slot>,
}

impl TokenPool {
    /// Create a pool holding `capacity` vacant tokens.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidConfig("token pool capacity must be at least 1".to_string()));
        }

        let (sender, receiver) = sync_channel(capacity);
        for _ in 0..capacity {
            sender.send(Slot::Vacant).map_err(|_| Error::WorkerLost)?;
        }
        Ok(Self {
            capacity,
            sender,
            receiver,
        })
    }

    /// Number of tokens in circulation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take a token, waiting until one is returned if all are in use.
    pub fn withdraw(&self) -> Result<Slot> {
        self.receiver.recv().map_err(|_| Error::WorkerLost)
    }

    /// A handle for returning a withdrawn token.
    pub fn returner(&self) -> TokenReturn {
        TokenReturn {
            sender: self.sender.clone(),
        }
    }

    /// Withdraw every token, yielding the documents still awaiting merge.
    ///
    /// Returns once all `capacity` tokens are back, i.e. once every dispatched
    /// unit has finished.
    pub fn drain(&self) -> Result<Vec<Document>> {
        let mut finished = Vec::new();
        for _ in 0..self.capacity {
            if let Slot::Completed(document) = self.withdraw()? {
                finished.push(*document);
            }
        }
        Ok(finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_starts_full_of_vacant_tokens() {
        let pool = TokenPool::new(3).unwrap();
        for _ in 0..3 {
            assert!(matches!(pool.withdraw().unwrap(), Slot::Vacant));
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(TokenPool::new(0).is_err());
    }

    #[test]
    fn test_completed_documents_come_back() {
        let pool = TokenPool::new(2).unwrap();
        let returner = pool.returner();

        let _ = pool.withdraw().unwrap();
        let handle = std::thread::spawn(move || {
            returner.complete(Document::discovered("a.pdf", Path::new("out")));
        });
        handle.join().unwrap();

        let drained = pool.drain().unwrap();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].source_path, Path::new("a.pdf"));
    }
}
