use shared::Coordinate;

use crate::form::LocationForm;
use crate::map::MapWidget;

/// Turns map clicks into form coordinates and keeps a single marker on the
/// last picked point.
pub struct CoordinatePicker<M: MapWidget> {
    map: M,
    marker: Option<M::Marker>,
}

impl<M: MapWidget> CoordinatePicker<M> {
    pub fn new(map: M) -> Self {
        Self { map, marker: None }
    }

    pub fn pick(&mut self, at: Coordinate, form: &mut LocationForm) {
        form.latitude = format_coord(at.latitude);
        form.longitude = format_coord(at.longitude);

        if let Some(previous) = self.marker.take() {
            self.map.remove_marker(previous);
        }
        self.marker = Some(self.map.add_marker(at));
    }

    #[cfg(test)]
    pub fn marker(&self) -> Option<&M::Marker> {
        self.marker.as_ref()
    }

    #[cfg(test)]
    pub fn map(&self) -> &M {
        &self.map
    }
}

pub fn format_coord(value: f64) -> String {
    format!("{value:.6}")
}
