use std::io::Write;
use std::sync::mpsc;
use std::time::Duration;

use stockview_core::NotificationSettings;
use stockview_observability::LogFormat;
use stockview_viewer::{DashboardView, Pipeline, ViewerConfig};

const WAIT: Duration = Duration::from_secs(5);

fn config_for(path: &std::path::Path, settings: NotificationSettings) -> ViewerConfig {
    ViewerConfig {
        snapshot_path: path.to_path_buf(),
        poll_interval: Duration::from_millis(20),
        settings,
        log_format: LogFormat::Compact,
    }
}

fn write_snapshot(path: &std::path::Path, body: &str) {
    let tmp = path.with_extension("tmp");
    let mut file = std::fs::File::create(&tmp).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.sync_all().unwrap();
    std::fs::rename(&tmp, path).unwrap();
}

fn spawn_collecting(config: &ViewerConfig) -> (Pipeline, mpsc::Receiver<DashboardView>) {
    let (tx, rx) = mpsc::channel();
    let pipeline = Pipeline::spawn(config, move |view| {
        let _ = tx.send(view.clone());
    })
    .unwrap();
    (pipeline, rx)
}

const FOUR_PRODUCTS: &str = r#"[
    {"id": "d", "name": "Drive Belt", "price": 250, "purchase_price": 200, "quantity": 8, "reorder_level": 5, "category": "Transmission", "updated_at": "2024-05-01T10:00:00Z"},
    {"id": "a", "name": "Air Filter", "price": 100, "purchase_price": 60, "quantity": 0, "reorder_level": 5, "category": "Engine", "updated_at": "2024-05-01T10:00:00Z"},
    {"id": "c", "name": "Chain Kit", "price": "1200.50", "quantity": 20, "reorder_level": 5, "max_stock": 10, "category": "Transmission", "updated_at": "2024-05-01T10:00:00Z"},
    {"id": "b", "name": "Brake Pad", "price": 450, "purchase_price": null, "quantity": 3, "reorder_level": 5, "category": "", "updated_at": "2024-05-01T10:00:00Z"}
]"#;

#[test]
fn snapshot_file_drives_dashboard_summary() {
    stockview_observability::init(LogFormat::Compact);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    write_snapshot(&path, FOUR_PRODUCTS);

    let (pipeline, views) = spawn_collecting(&config_for(&path, NotificationSettings::default()));

    match views.recv_timeout(WAIT).unwrap() {
        DashboardView::Ready {
            revision,
            summary,
            alerts,
            ..
        } => {
            assert_eq!(revision, 1);
            assert_eq!(summary.total_products, 4);
            assert_eq!(summary.total_units, 31);
            assert_eq!(summary.critical, 1);
            assert_eq!(summary.low, 1);
            assert_eq!(summary.overstocked, 1);
            assert_eq!(summary.adequate, 1);
            assert_eq!(summary.in_stock, 2);
            assert_eq!(summary.stock_health_percent, 50);
            assert_eq!(summary.categories, 2);
            // 250*8 + 100*0 + 1200.50*20 + 450*3
            assert_eq!(summary.inventory_value.to_string(), "27360.00");
            assert_eq!(summary.inventory_cost.to_string(), "1600");

            let names: Vec<&str> = alerts.iter().map(|a| a.name.as_str()).collect();
            assert_eq!(names, vec!["Air Filter", "Brake Pad"]);
        }
        other => panic!("expected ready view, got {other:?}"),
    }

    pipeline.shutdown();
}

#[test]
fn rewritten_file_publishes_new_revision_with_notices() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    write_snapshot(
        &path,
        r#"[{"id": "x", "name": "Fork Oil", "price": 90, "quantity": 40, "reorder_level": 5, "updated_at": "2024-05-01T10:00:00Z"}]"#,
    );

    let settings = NotificationSettings::new(true, 10).unwrap();
    let (pipeline, views) = spawn_collecting(&config_for(&path, settings));

    let first = views.recv_timeout(WAIT).unwrap();
    assert!(matches!(first, DashboardView::Ready { revision: 1, ref new_notices, .. } if new_notices.is_empty()));

    // No wait for the mtime to move: the length differs, which the watch
    // also compares.
    write_snapshot(
        &path,
        r#"[{"id": "x", "name": "Fork Oil", "price": 90, "quantity": 7, "reorder_level": 5, "updated_at": "2024-05-02T10:00:00Z"}]"#,
    );

    match views.recv_timeout(WAIT).unwrap() {
        DashboardView::Ready {
            revision,
            new_notices,
            ..
        } => {
            assert_eq!(revision, 2);
            assert_eq!(new_notices.len(), 1);
            assert_eq!(new_notices[0].product_id.as_str(), "x");
            assert_eq!(new_notices[0].quantity, 7);
        }
        other => panic!("expected ready view, got {other:?}"),
    }

    pipeline.shutdown();
}

#[test]
fn malformed_file_fails_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    write_snapshot(&path, "[{\"id\": \"broken\"");

    let (pipeline, views) = spawn_collecting(&config_for(&path, NotificationSettings::default()));

    assert!(matches!(
        views.recv_timeout(WAIT).unwrap(),
        DashboardView::Failed { .. }
    ));
    assert!(pipeline.wait_for_failure().is_some());

    pipeline.shutdown();
}

#[test]
fn retry_after_failure_resubscribes_to_repaired_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    write_snapshot(&path, "[{\"id\": \"broken\"");

    let (mut pipeline, views) =
        spawn_collecting(&config_for(&path, NotificationSettings::default()));

    assert!(matches!(
        views.recv_timeout(WAIT).unwrap(),
        DashboardView::Failed { .. }
    ));
    assert!(pipeline.wait_for_failure().is_some());

    write_snapshot(&path, FOUR_PRODUCTS);
    assert!(pipeline.retry().unwrap());

    assert_eq!(views.recv_timeout(WAIT).unwrap(), DashboardView::Loading);
    match views.recv_timeout(WAIT).unwrap() {
        DashboardView::Ready {
            revision, summary, ..
        } => {
            assert_eq!(revision, 1);
            assert_eq!(summary.total_products, 4);
        }
        other => panic!("expected ready view, got {other:?}"),
    }

    // Live again: nothing to retry.
    assert!(!pipeline.retry().unwrap());

    pipeline.shutdown();
}
