use crate::entities::{MapPoint, RankedRecord};

/// A named group of markers, e.g. the nearest films.
#[derive(Debug, Clone)]
pub struct MapLayer {
    pub name: String,
    pub records: Vec<RankedRecord>,
}

impl MapLayer {
    pub fn new(name: impl Into<String>, records: Vec<RankedRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

pub trait MapRenderer {
    fn render(&self, center: MapPoint, layers: &[MapLayer]) -> anyhow::Result<()>;
}
