use serde::Deserialize;
use shared::Coordinate;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(module = "/leaflet_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map_js(lat: f64, lon: f64, zoom: u8);
    #[wasm_bindgen(js_name = addMarker)]
    fn add_marker_js(lat: f64, lon: f64) -> u32;
    #[wasm_bindgen(js_name = removeMarker)]
    fn remove_marker_js(handle: u32);
}

pub const INITIAL_CENTER: Coordinate = Coordinate {
    latitude: 0.0,
    longitude: 0.0,
};
pub const INITIAL_ZOOM: u8 = 2;

/// Marker primitives of the map widget.
pub trait MapWidget {
    type Marker;

    fn add_marker(&mut self, at: Coordinate) -> Self::Marker;
    fn remove_marker(&mut self, marker: Self::Marker);
}

/// Leaflet map living in the `#map` element, driven through `leaflet_map.js`.
#[derive(Debug)]
pub struct LeafletMap;

impl LeafletMap {
    pub fn init() -> Self {
        init_map_js(
            INITIAL_CENTER.latitude,
            INITIAL_CENTER.longitude,
            INITIAL_ZOOM,
        );
        Self
    }
}

/// Opaque handle to a marker held on the JS side.
#[derive(Debug, PartialEq, Eq)]
pub struct MarkerHandle(u32);

impl MapWidget for LeafletMap {
    type Marker = MarkerHandle;

    fn add_marker(&mut self, at: Coordinate) -> MarkerHandle {
        MarkerHandle(add_marker_js(at.latitude, at.longitude))
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        remove_marker_js(marker.0);
    }
}

/// `detail` of the `map-click` event dispatched by `leaflet_map.js`.
#[derive(Debug, Deserialize)]
pub struct MapClickPayload {
    pub lat: f64,
    pub lon: f64,
}

/// Coordinate of a decoded map click, rejecting anything off the globe.
pub fn click_coordinate(decoded: Result<MapClickPayload, String>) -> Result<Coordinate, String> {
    let payload = decoded.map_err(|err| format!("undecodable map-click detail: {err}"))?;
    let at = Coordinate::new(payload.lat, payload.lon);
    if at.is_valid() {
        Ok(at)
    } else {
        Err(format!("map-click outside the globe: {}, {}", payload.lat, payload.lon))
    }
}
