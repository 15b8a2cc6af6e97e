use serde::Deserialize;

/// A single archive entry, reduced to what gets reposted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comic {
    pub index: u32,
    pub image_url: String,
    pub caption: String,
}

/// `info.0.json` as served by the archive. Only the fields the reposter
/// reads are kept; `num` is present on every entry but only needed for the
/// latest one.
#[derive(Deserialize, Debug)]
pub struct ComicInfo {
    pub num: Option<u32>,
    pub img: Option<String>,
    pub alt: Option<String>,
}
