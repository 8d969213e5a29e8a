use std::collections::BTreeMap;

use anyhow::anyhow;

use super::{LatLng, MapSurface, Marker, MarkerId, TileLayer, ZoneLayer};

/// Surface that keeps the drawn state in memory instead of rendering it.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub view: Option<(LatLng, u8)>,
    pub tile_layers: Vec<TileLayer>,
    pub zone_layers: Vec<ZoneLayer>,
    pub markers: BTreeMap<MarkerId, Marker>,
    pub open_popup: Option<MarkerId>,
    pub removed: Vec<MarkerId>,
    /// Most markers ever on the surface at once.
    pub max_markers: usize,
    next_id: u64,
}

impl MapSurface for RecordingSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8) -> anyhow::Result<()> {
        log::debug!("set view {center} zoom {zoom}");
        self.view = Some((center, zoom));
        Ok(())
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) -> anyhow::Result<()> {
        log::debug!("add tile layer {}", layer.url_template);
        self.tile_layers.push(layer.clone());
        Ok(())
    }

    fn add_zone_layer(&mut self, layer: &ZoneLayer) -> anyhow::Result<()> {
        log::debug!("add {} zones", layer.zones.features.len());
        self.zone_layers.push(layer.clone());
        Ok(())
    }

    fn add_marker(&mut self, marker: Marker) -> anyhow::Result<MarkerId> {
        self.next_id += 1;
        let id = MarkerId(self.next_id);

        log::debug!("add marker {id:?} at {}", marker.position);
        self.markers.insert(id, marker);
        self.max_markers = self.max_markers.max(self.markers.len());

        Ok(id)
    }

    fn remove_marker(&mut self, id: MarkerId) -> anyhow::Result<()> {
        self.markers
            .remove(&id)
            .ok_or_else(|| anyhow!("marker {id:?} is not on the map"))?;

        log::debug!("remove marker {id:?}");
        self.removed.push(id);
        if self.open_popup == Some(id) {
            self.open_popup = None;
        }

        Ok(())
    }

    fn open_popup(&mut self, id: MarkerId) -> anyhow::Result<()> {
        if !self.markers.contains_key(&id) {
            return Err(anyhow!("marker {id:?} is not on the map"));
        }

        self.open_popup = Some(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_unknown_marker_fails() {
        let mut surface = RecordingSurface::default();
        assert!(surface.remove_marker(MarkerId(7)).is_err());
        assert!(surface.open_popup(MarkerId(7)).is_err());
    }
}
