use crate::dispatch::service::DispatchService;
use crate::models::user::Role;
use crate::utils::time::{current_timestamp, elapsed_seconds};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Request counters maintained by the HTTP handlers
pub struct Metrics {
    pub booking_requests: AtomicU64,
    pub rides_booked: AtomicU64,
    pub no_driver_available: AtomicU64,
    pub cancellations: AtomicU64,
    pub rejected_cancellations: AtomicU64,
    pub registrations: AtomicU64,
    pub rejected_registrations: AtomicU64,
    pub failed_authentications: AtomicU64,
    pub start_time: i64,
}

#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    pub booking_requests: u64,
    pub rides_booked: u64,
    pub no_driver_available: u64,
    pub booking_success_rate: f64,
    pub cancellations: u64,
    pub rejected_cancellations: u64,
    pub registrations: u64,
    pub rejected_registrations: u64,
    pub failed_authentications: u64,
    pub registered_users: usize,
    pub registered_drivers: usize,
    pub available_drivers: usize,
    pub active_rides: usize,
    pub completed_rides: usize,
    pub cancelled_rides: usize,
    pub total_rides: usize,
    pub uptime_seconds: i64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            booking_requests: AtomicU64::new(0),
            rides_booked: AtomicU64::new(0),
            no_driver_available: AtomicU64::new(0),
            cancellations: AtomicU64::new(0),
            rejected_cancellations: AtomicU64::new(0),
            registrations: AtomicU64::new(0),
            rejected_registrations: AtomicU64::new(0),
            failed_authentications: AtomicU64::new(0),
            start_time: current_timestamp(),
        }
    }

    /// Count a booking request and its outcome
    pub fn record_booking(&self, booked: bool) {
        self.booking_requests.fetch_add(1, Ordering::Relaxed);
        if booked {
            self.rides_booked.fetch_add(1, Ordering::Relaxed);
        } else {
            self.no_driver_available.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_cancellation(&self, cancelled: bool) {
        if cancelled {
            self.cancellations.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected_cancellations.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_registration(&self, registered: bool) {
        if registered {
            self.registrations.fetch_add(1, Ordering::Relaxed);
        } else {
            self.rejected_registrations.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_failed_authentications(&self) {
        self.failed_authentications.fetch_add(1, Ordering::Relaxed);
    }

    /// Counters plus the current view of the dispatch core.
    /// The store counts are taken one after another, not as one snapshot.
    pub fn get_snapshot(&self, dispatch: &DispatchService) -> MetricsSnapshot {
        let booking_requests = self.booking_requests.load(Ordering::Relaxed);
        let rides_booked = self.rides_booked.load(Ordering::Relaxed);

        let booking_success_rate = if booking_requests > 0 {
            (rides_booked as f64 / booking_requests as f64) * 100.0
        } else {
            0.0
        };

        let ride_counts = dispatch.get_ride_counts();

        MetricsSnapshot {
            booking_requests,
            rides_booked,
            no_driver_available: self.no_driver_available.load(Ordering::Relaxed),
            booking_success_rate,
            cancellations: self.cancellations.load(Ordering::Relaxed),
            rejected_cancellations: self.rejected_cancellations.load(Ordering::Relaxed),
            registrations: self.registrations.load(Ordering::Relaxed),
            rejected_registrations: self.rejected_registrations.load(Ordering::Relaxed),
            failed_authentications: self.failed_authentications.load(Ordering::Relaxed),
            registered_users: dispatch.accounts().len(),
            registered_drivers: dispatch.accounts().count_role(Role::Driver),
            available_drivers: dispatch.get_available_drivers(),
            active_rides: ride_counts.active(),
            completed_rides: ride_counts.completed,
            cancelled_rides: ride_counts.cancelled,
            total_rides: ride_counts.total(),
            uptime_seconds: elapsed_seconds(self.start_time, current_timestamp()),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics() {
        let metrics = Metrics::new();

        assert_eq!(metrics.booking_requests.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.cancellations.load(Ordering::Relaxed), 0);
        assert!(metrics.start_time > 0);
    }

    #[test]
    fn test_record_booking() {
        let metrics = Metrics::new();

        metrics.record_booking(true);
        metrics.record_booking(true);
        metrics.record_booking(false);

        assert_eq!(metrics.booking_requests.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.rides_booked.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.no_driver_available.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_record_cancellation_and_registration() {
        let metrics = Metrics::new();

        metrics.record_cancellation(true);
        metrics.record_cancellation(false);
        metrics.record_registration(true);
        metrics.record_registration(false);
        metrics.record_registration(false);
        metrics.increment_failed_authentications();

        assert_eq!(metrics.cancellations.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.rejected_cancellations.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.registrations.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.rejected_registrations.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.failed_authentications.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_get_snapshot_empty() {
        let metrics = Metrics::new();
        let dispatch = DispatchService::default();

        let snapshot = metrics.get_snapshot(&dispatch);

        assert_eq!(snapshot.booking_requests, 0);
        assert_eq!(snapshot.booking_success_rate, 0.0);
        assert_eq!(snapshot.registered_users, 0);
        assert_eq!(snapshot.available_drivers, 0);
        assert_eq!(snapshot.active_rides, 0);
        assert_eq!(snapshot.total_rides, 0);
        assert!(snapshot.uptime_seconds >= 0);
    }

    #[test]
    fn test_get_snapshot_with_data() {
        let metrics = Metrics::new();
        let dispatch = DispatchService::default();

        dispatch.register_user("d1", "pass", Role::Driver);
        dispatch.register_user("d2", "pass", Role::Driver);
        dispatch.register_user("r1", "pass", Role::Rider);
        dispatch.set_driver_available("d1", "Andheri");
        dispatch.set_driver_available("d2", "Bandra");

        metrics.record_booking(!matches!(
            dispatch.book_cab("r1", "Andheri", "Bandra"),
            crate::dispatch::service::BookingOutcome::NoDriverAvailable
        ));
        metrics.record_booking(false);
        metrics.record_booking(false);
        metrics.record_booking(true);

        let snapshot = metrics.get_snapshot(&dispatch);

        assert_eq!(snapshot.booking_requests, 4);
        assert_eq!(snapshot.rides_booked, 2);
        assert_eq!(snapshot.booking_success_rate, 50.0);
        assert_eq!(snapshot.registered_users, 3);
        assert_eq!(snapshot.registered_drivers, 2);
        assert_eq!(snapshot.available_drivers, 1);
        assert_eq!(snapshot.active_rides, 1);
        assert_eq!(snapshot.completed_rides, 0);
        assert_eq!(snapshot.cancelled_rides, 0);
        assert_eq!(snapshot.total_rides, 1);
    }

    #[test]
    fn test_get_snapshot_status_breakdown() {
        let metrics = Metrics::new();
        let dispatch = DispatchService::default();

        for name in ["d1", "d2", "d3"] {
            dispatch.register_user(name, "pass", Role::Driver);
            dispatch.set_driver_available(name, "Andheri");
        }
        dispatch.book_cab("r1", "Andheri", "Bandra");
        dispatch.book_cab("r2", "Andheri", "Bandra");
        dispatch.book_cab("r3", "Andheri", "Bandra");
        dispatch.cancel_ride("RIDE_1001");
        dispatch
            .rides()
            .set_status("RIDE_1002", crate::models::ride::RideStatus::Completed);

        let snapshot = metrics.get_snapshot(&dispatch);

        assert_eq!(snapshot.active_rides, 1);
        assert_eq!(snapshot.completed_rides, 1);
        assert_eq!(snapshot.cancelled_rides, 1);
        assert_eq!(snapshot.total_rides, 3);
    }
}
