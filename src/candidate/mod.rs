//! Candidate extraction from similarity maps.

pub(crate) mod nms;
