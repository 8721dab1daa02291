use seed::{prelude::*, *};
use shared::{ApiReply, OverpassReport, Scene, SceneReport};

pub const SUBMISSION_FAILED: &str = "An error occurred while submitting the location.";
pub const SCENE_QUERY_FAILED: &str = "An error occurred while fetching Landsat scenes.";
pub const OVERPASS_HEADER: &str = "Upcoming Landsat overpasses:";
pub const NO_OVERPASSES: &str = "No upcoming Landsat overpasses found for this location.";
pub const SCENE_HEADER: &str = "Available Landsat Data:";
pub const NO_SCENES: &str =
    "No available Landsat scenes for this location and cloud coverage threshold.";

/// What the result area currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultView {
    #[default]
    Idle,
    /// Rejected locally; nothing was sent.
    Invalid(String),
    /// Transport or decoding failure.
    Failed(String),
    /// `error` field reported by the backend, shown verbatim.
    ServerError(String),
    Overpasses {
        message: String,
        times: Vec<String>,
    },
    NoOverpasses {
        message: String,
    },
    Scenes(Vec<Scene>),
    NoScenes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub view: ResultView,
    pub refresh_watch_list: bool,
}

pub fn reconcile_submission(result: Result<ApiReply<OverpassReport>, String>) -> Reconciled {
    match result {
        Err(_) => Reconciled {
            view: ResultView::Failed(SUBMISSION_FAILED.to_string()),
            refresh_watch_list: false,
        },
        Ok(ApiReply::Failure { error }) => Reconciled {
            view: ResultView::ServerError(error),
            refresh_watch_list: false,
        },
        Ok(ApiReply::Success(report)) => Reconciled {
            view: ResultView::from_overpasses(report),
            refresh_watch_list: true,
        },
    }
}

pub fn reconcile_scenes(result: Result<ApiReply<SceneReport>, String>) -> ResultView {
    match result {
        Err(_) => ResultView::Failed(SCENE_QUERY_FAILED.to_string()),
        Ok(ApiReply::Failure { error }) => ResultView::ServerError(error),
        Ok(ApiReply::Success(report)) if report.data.is_empty() => ResultView::NoScenes,
        Ok(ApiReply::Success(report)) => ResultView::Scenes(report.data),
    }
}

impl ResultView {
    fn from_overpasses(report: OverpassReport) -> Self {
        if report.overpasses.is_empty() {
            ResultView::NoOverpasses {
                message: report.message,
            }
        } else {
            ResultView::Overpasses {
                message: report.message,
                times: report.overpasses,
            }
        }
    }

    pub fn view<Ms: 'static>(&self) -> Node<Ms> {
        match self {
            ResultView::Idle => empty![],
            ResultView::Invalid(msg) | ResultView::Failed(msg) | ResultView::ServerError(msg) => {
                p![C!["error"], msg]
            }
            ResultView::Overpasses { message, times } => div![
                p![message],
                p![OVERPASS_HEADER],
                ul![C!["overpasses"], times.iter().map(|time| li![time])],
            ],
            ResultView::NoOverpasses { message } => div![p![message], p![NO_OVERPASSES]],
            ResultView::Scenes(scenes) => div![
                h3![SCENE_HEADER],
                ul![C!["scenes"], scenes.iter().map(|scene| li![scene_label(scene)])],
            ],
            ResultView::NoScenes => p![NO_SCENES],
        }
    }
}

pub fn scene_label(scene: &Scene) -> String {
    format!(
        "Date: {}, Cloud Coverage: {}%",
        scene.date, scene.cloud_coverage
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<ApiReply<T>, String> {
        serde_json::from_str(body).map_err(|err| err.to_string())
    }

    #[test]
    fn overpasses_render_message_then_list() {
        let reconciled =
            reconcile_submission(parse(r#"{"message":"OK","overpasses":["2024-01-01T10:00Z"]}"#));
        assert!(reconciled.refresh_watch_list);
        assert_eq!(
            reconciled.view,
            ResultView::Overpasses {
                message: "OK".into(),
                times: vec!["2024-01-01T10:00Z".into()],
            }
        );
    }

    #[test]
    fn empty_overpasses_render_notice_without_list() {
        let reconciled = reconcile_submission(parse(r#"{"message":"OK","overpasses":[]}"#));
        assert!(reconciled.refresh_watch_list);
        assert_eq!(
            reconciled.view,
            ResultView::NoOverpasses {
                message: "OK".into()
            }
        );
    }

    #[test]
    fn server_error_is_verbatim_and_skips_refresh() {
        let reconciled = reconcile_submission(parse(r#"{"error":"Invalid coordinates"}"#));
        assert!(!reconciled.refresh_watch_list);
        assert_eq!(
            reconciled.view,
            ResultView::ServerError("Invalid coordinates".into())
        );
    }

    #[test]
    fn error_wins_over_data() {
        let reconciled = reconcile_submission(parse(
            r#"{"error":"boom","message":"OK","overpasses":["2024-01-01T10:00Z"]}"#,
        ));
        assert_eq!(reconciled.view, ResultView::ServerError("boom".into()));
        assert!(!reconciled.refresh_watch_list);
    }

    #[test]
    fn transport_failure_is_generic() {
        let reconciled = reconcile_submission(Err("NetworkError".into()));
        assert!(!reconciled.refresh_watch_list);
        assert_eq!(reconciled.view, ResultView::Failed(SUBMISSION_FAILED.into()));

        let reconciled = reconcile_submission(parse("not json"));
        assert_eq!(reconciled.view, ResultView::Failed(SUBMISSION_FAILED.into()));
    }

    #[test]
    fn scenes() {
        let view = reconcile_scenes(parse(
            r#"{"message":"Landsat data fetched successfully.","data":[{"date":"2024-05-01","cloud_coverage":3.5}]}"#,
        ));
        let ResultView::Scenes(scenes) = view else {
            panic!("expected scenes, got {view:?}");
        };
        assert_eq!(scene_label(&scenes[0]), "Date: 2024-05-01, Cloud Coverage: 3.5%");

        assert_eq!(reconcile_scenes(parse(r#"{"data":[]}"#)), ResultView::NoScenes);
        assert_eq!(
            reconcile_scenes(parse(r#"{"error":"catalogue unavailable"}"#)),
            ResultView::ServerError("catalogue unavailable".into())
        );
        assert_eq!(
            reconcile_scenes(Err("offline".into())),
            ResultView::Failed(SCENE_QUERY_FAILED.into())
        );
    }
}
