//! Projections over cell content: the strongest value and freshness.

use crate::content::{Content, Supported};
use crate::error::MergeError;
use crate::id::PremiseId;
use crate::merge::Merge;

/// Read access to which premises are currently believed.
pub trait Beliefs {
    /// Whether `premise` is in (not kicked out).
    fn is_believed(&self, premise: PremiseId) -> bool;
}

/// Every premise believed. Useful where no premise registry exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllBelieved;

impl Beliefs for AllBelieved {
    fn is_believed(&self, _premise: PremiseId) -> bool {
        true
    }
}

/// Selects the most informative view of a cell's content.
///
/// Propagators read this projection, never the raw content.
pub trait Strongest: 'static {
    /// Project `content` given the current beliefs.
    fn strongest(
        &self,
        content: &Content,
        beliefs: &dyn Beliefs,
        merge: &dyn Merge,
    ) -> Result<Content, MergeError>;
}

/// Default projection: plain contents are their own strongest value; a
/// TMS folds every contribution whose premises are all believed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BelievedStrongest;

impl Strongest for BelievedStrongest {
    fn strongest(
        &self,
        content: &Content,
        beliefs: &dyn Beliefs,
        merge: &dyn Merge,
    ) -> Result<Content, MergeError> {
        match content {
            Content::Tms(tms) => {
                let mut acc: Option<Supported> = None;
                for entry in tms.entries() {
                    if !entry.support.all_believed(beliefs) {
                        continue;
                    }
                    acc = match acc {
                        None => Some(entry.clone()),
                        Some(current) => match merge.merge_supported(&current, entry)? {
                            Content::Supported(s) => Some(s),
                            other => return Ok(other),
                        },
                    };
                }
                Ok(acc.map_or(Content::Nothing, Content::Supported))
            }
            Content::Supported(s) if !s.support.all_believed(beliefs) => Ok(Content::Nothing),
            other => Ok(other.clone()),
        }
    }
}

/// Decides whether a content counts as fresh input for scheduling.
pub trait Freshness: 'static {
    /// Whether `content` is ready to be consumed.
    fn is_fresh(&self, content: &Content) -> bool;
}

/// Default freshness: usable content is fresh.
#[derive(Clone, Copy, Debug, Default)]
pub struct UsableFreshness;

impl Freshness for UsableFreshness {
    fn is_fresh(&self, content: &Content) -> bool {
        content.is_usable()
    }
}
