pub mod api;
pub mod form;
pub mod map;
pub mod picker;
pub mod render;
pub mod watchlist;

use seed::{prelude::*, virtual_dom::AtValue, *};
use shared::{ApiReply, Coordinate, OverpassReport, SavedLocation, SceneReport};
use wasm_bindgen::{JsCast, prelude::wasm_bindgen};

use crate::form::LocationForm;
use crate::map::{LeafletMap, click_coordinate};
use crate::picker::CoordinatePicker;
use crate::render::{ResultView, reconcile_scenes, reconcile_submission};
use crate::watchlist::WatchList;

pub struct Model {
    form: LocationForm,
    picker: CoordinatePicker<LeafletMap>,
    pending: bool,
    result: ResultView,
    watch_list: WatchList,
}

pub enum Msg {
    LatitudeChanged(String),
    LongitudeChanged(String),
    NameChanged(String),
    CloudCoverageChanged(String),
    LeadTimeChanged(String),
    MapClicked(Coordinate),
    Submit,
    QueryScenes,
    LocationSubmitted(Result<ApiReply<OverpassReport>, String>),
    ScenesFetched(Result<ApiReply<SceneReport>, String>),
    LocationsFetched(Result<Vec<SavedLocation>, String>),
}

pub fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.stream(streams::window_event(Ev::from("map-click"), |event| {
        let Ok(event) = event.dyn_into::<web_sys::CustomEvent>() else {
            web_sys::console::error_1(&"[frontend] map-click is not a CustomEvent".into());
            return None;
        };
        let decoded =
            serde_wasm_bindgen::from_value(event.detail()).map_err(|err| err.to_string());
        match click_coordinate(decoded) {
            Ok(at) => Some(Msg::MapClicked(at)),
            Err(err) => {
                web_sys::console::error_1(&format!("[frontend] {err}").into());
                None
            }
        }
    }));
    orders.perform_cmd(async move { Msg::LocationsFetched(api::fetch_locations().await) });

    Model {
        form: LocationForm::default(),
        picker: CoordinatePicker::new(LeafletMap::init()),
        pending: false,
        result: ResultView::Idle,
        watch_list: WatchList::default(),
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::LatitudeChanged(val) => model.form.latitude = val,
        Msg::LongitudeChanged(val) => model.form.longitude = val,
        Msg::NameChanged(val) => model.form.name = val,
        Msg::CloudCoverageChanged(val) => model.form.cloud_coverage = val,
        Msg::LeadTimeChanged(val) => model.form.notification_lead_time = val,
        Msg::MapClicked(at) => {
            web_sys::console::debug_1(
                &format!(
                    "[frontend] map click lat={:.6} lon={:.6}",
                    at.latitude, at.longitude
                )
                .into(),
            );
            model.picker.pick(at, &mut model.form);
        }
        Msg::Submit => {
            if model.pending {
                return;
            }
            match model.form.to_request() {
                Ok(payload) => {
                    model.pending = true;
                    orders.perform_cmd(async move {
                        Msg::LocationSubmitted(api::submit_location(payload).await)
                    });
                }
                Err(err) => model.result = ResultView::Invalid(err.to_string()),
            }
        }
        Msg::QueryScenes => {
            if model.pending {
                return;
            }
            match model.form.to_scene_query() {
                Ok(query) => {
                    model.pending = true;
                    orders.perform_cmd(async move {
                        Msg::ScenesFetched(api::query_scenes(query).await)
                    });
                }
                Err(err) => model.result = ResultView::Invalid(err.to_string()),
            }
        }
        Msg::LocationSubmitted(result) => {
            model.pending = false;
            if let Err(err) = &result {
                web_sys::console::error_1(&format!("[frontend] submit failed: {err}").into());
            }
            let reconciled = reconcile_submission(result);
            model.result = reconciled.view;
            if reconciled.refresh_watch_list {
                orders.perform_cmd(async move {
                    Msg::LocationsFetched(api::fetch_locations().await)
                });
            }
        }
        Msg::ScenesFetched(result) => {
            model.pending = false;
            if let Err(err) = &result {
                web_sys::console::error_1(&format!("[frontend] scene query failed: {err}").into());
            }
            model.result = reconcile_scenes(result);
        }
        Msg::LocationsFetched(result) => {
            if let Err(err) = model.watch_list.apply(result) {
                web_sys::console::error_1(
                    &format!("[frontend] could not load saved locations: {err}").into(),
                );
            }
        }
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        C!["app-container"],
        h1!["Landsat Watch"],
        view_form(model),
        div![id!["result"], model.result.view()],
        section![
            C!["saved"],
            h2!["Saved locations"],
            model.watch_list.view(),
        ],
    ]
}

fn view_form(model: &Model) -> Node<Msg> {
    let input_field = |label: &str, value: &str, msg: fn(String) -> Msg| {
        div![
            C!["input-field"],
            label![label],
            input![
                attrs! {
                    At::Value => value,
                    At::AutoComplete => "off",
                    At::SpellCheck => "false",
                },
                input_ev(Ev::Input, msg),
            ]
        ]
    };

    form![
        C!["controls"],
        fieldset![
            legend!["Location"],
            input_field("Latitude", &model.form.latitude, Msg::LatitudeChanged),
            input_field("Longitude", &model.form.longitude, Msg::LongitudeChanged),
            input_field("Name", &model.form.name, Msg::NameChanged),
            small!["Click the map to fill in the coordinates."],
        ],
        fieldset![
            legend!["Alerts"],
            input_field(
                "Max cloud coverage (%)",
                &model.form.cloud_coverage,
                Msg::CloudCoverageChanged
            ),
            input_field(
                "Notification lead time (h)",
                &model.form.notification_lead_time,
                Msg::LeadTimeChanged
            ),
        ],
        button![
            "Watch location",
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::Submit
            }),
            attrs! { At::Disabled => bool_attr(model.pending) },
        ],
        button![
            "Find scenes",
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::QueryScenes
            }),
            attrs! { At::Disabled => bool_attr(model.pending) },
        ],
    ]
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}
