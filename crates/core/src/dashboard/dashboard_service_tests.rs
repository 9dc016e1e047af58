use super::*;
use crate::backend::mock_backend::MockBackend;
use crate::backend::{SeedRunResult, SeedStatus};
use crate::investors::Investor;
use crate::notifications::NoticeLevel;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn investor(id: &str, aum: Decimal, invested: Decimal, gain: Decimal) -> Investor {
    Investor {
        investor_id: id.to_string(),
        total_aum: aum,
        total_invested: invested,
        gain_loss_pct: gain,
        ..Investor::default()
    }
}

fn seeded_backend() -> MockBackend {
    let mut backend = MockBackend::with_investors(vec![
        investor("INV0001", dec!(150000), dec!(120000), dec!(25)),
        investor("INV0002", dec!(80000), dec!(100000), dec!(-20)),
    ]);
    backend.analytics.profit_loss_split.profit = 1;
    backend.analytics.profit_loss_split.loss = 1;
    backend
}

#[tokio::test]
async fn test_unseeded_backend_needs_seeding() {
    let mut backend = MockBackend::default();
    backend.seed_status = SeedStatus {
        seeded: false,
        investor_count: 0,
    };
    let backend = Arc::new(backend);
    let service = DashboardService::new(backend.clone());

    let loaded = service.load_dashboard().await.unwrap();
    assert_eq!(loaded.data, DashboardView::NeedsSeeding);
    assert!(loaded.notices.is_empty());
    assert_eq!(backend.calls(), vec!["seed_status"]);
}

#[tokio::test]
async fn test_loads_stats_then_analytics() {
    let backend = Arc::new(seeded_backend());
    let service = DashboardService::new(backend.clone());

    let loaded = service.load_dashboard().await.unwrap();
    match loaded.data {
        DashboardView::Ready { stats, analytics } => {
            assert_eq!(stats.total_investors, 2);
            assert_eq!(stats.total_aum, dec!(230000));
            assert_eq!(stats.avg_gain, dec!(2.5));
            assert_eq!(analytics.unwrap().profit_loss_split.profit_pct(), dec!(50));
        }
        other => panic!("unexpected view: {:?}", other),
    }
    assert_eq!(
        backend.calls(),
        vec!["seed_status", "list_investors", "dashboard_analytics"]
    );
}

#[tokio::test]
async fn test_analytics_failure_keeps_stats() {
    let backend = Arc::new(seeded_backend());
    backend.fail("dashboard_analytics", 500, None);
    let service = DashboardService::new(backend.clone());

    let loaded = service.load_dashboard().await.unwrap();
    assert!(loaded.has_errors());
    assert_eq!(loaded.notices[0].message, DASHBOARD_LOAD_FAILED);
    match loaded.data {
        DashboardView::Ready { stats, analytics } => {
            assert_eq!(stats.total_investors, 2);
            assert!(analytics.is_none());
        }
        other => panic!("unexpected view: {:?}", other),
    }
}

#[tokio::test]
async fn test_investor_failure_is_an_error() {
    let backend = Arc::new(seeded_backend());
    backend.fail("list_investors", 0, None);
    let service = DashboardService::new(backend.clone());

    let err = service.load_dashboard().await.unwrap_err();
    assert_eq!(err.user_message(DASHBOARD_LOAD_FAILED), DASHBOARD_LOAD_FAILED);
    assert!(!backend.calls().contains(&"dashboard_analytics".to_string()));
}

#[tokio::test]
async fn test_seed_reports_count() {
    let mut backend = MockBackend::default();
    backend.seed_result = SeedRunResult {
        success: true,
        message: "Seeded".to_string(),
        count: Some(300),
    };
    let service = DashboardService::new(Arc::new(backend));

    let loaded = service.seed_database().await.unwrap();
    assert_eq!(loaded.data, 300);
    let last = loaded.notices.last().unwrap();
    assert_eq!(last.level, NoticeLevel::Success);
    assert_eq!(last.message, "Successfully seeded 300 investors!");
}

#[tokio::test]
async fn test_unsuccessful_seed_is_an_error() {
    let backend = MockBackend::default();
    let service = DashboardService::new(Arc::new(backend));

    let err = service.seed_database().await.unwrap_err();
    assert_eq!(err.user_message(SEED_FAILED), SEED_FAILED);
}
