mod common;

use book_reservations::application::reservation::{
    ErrorKind, ReservationApplicationError, create_reservation, get_active_reservations,
    get_all_reservations, get_overdue_reservations, get_overdue_reservations_as_of,
    get_reservation_by_id, get_reservations_by_user_id, return_book,
};
use book_reservations::domain::commands::{CreateReservation, ReturnBook};
use book_reservations::domain::{
    Book, BookExternalId, Reservation, ReservationId, ReservationStatus, User, UserId,
};
use chrono::{Days, NaiveDate};
use common::{BOOK_ID, Fixture, USER_ID, date, fixture, test_book};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn create_cmd(rental_days: i32, start_date: NaiveDate) -> CreateReservation {
    CreateReservation {
        user_id: UserId::new(USER_ID),
        book_external_id: BookExternalId::new(BOOK_ID),
        rental_days,
        start_date,
    }
}

async fn reserve(fx: &Fixture, rental_days: i32, start_date: NaiveDate) -> Reservation {
    create_reservation(&fx.deps, create_cmd(rental_days, start_date))
        .await
        .expect("reservation should be created")
}

fn return_cmd(reservation: &Reservation, return_date: NaiveDate) -> ReturnBook {
    ReturnBook {
        reservation_id: reservation.id,
        return_date,
    }
}

// ============================================================================
// create_reservation
// ============================================================================

#[tokio::test]
async fn test_create_reservation_success() {
    // Arrange
    let fx = fixture();
    let start = date(2024, 3, 1);

    // Act
    let reservation = reserve(&fx, 7, start).await;

    // Assert: projection
    assert_eq!(reservation.id, ReservationId::new(1));
    assert_eq!(reservation.user_id, UserId::new(USER_ID));
    assert_eq!(reservation.user_name, "Juan Pérez");
    assert_eq!(reservation.book_external_id, BookExternalId::new(BOOK_ID));
    assert_eq!(reservation.book_title, "The Lord of the Rings");
    assert_eq!(reservation.rental_days, 7);
    assert_eq!(reservation.start_date, start);
    assert_eq!(reservation.expected_return_date, date(2024, 3, 8));
    assert_eq!(reservation.actual_return_date, None);
    assert_eq!(reservation.daily_rate, dec!(15.99));
    assert_eq!(reservation.total_fee, dec!(111.93));
    assert_eq!(reservation.late_fee, None);
    assert_eq!(reservation.status, ReservationStatus::Active);

    // persisted exactly once, inventory down exactly once
    assert_eq!(fx.store.writes(), 1);
    assert_eq!(fx.inventory.decrease_calls(), 1);
    assert_eq!(fx.inventory.increase_calls(), 0);
    assert_eq!(fx.inventory.available_quantity(BookExternalId::new(BOOK_ID)), Some(4));

    let stored = get_reservation_by_id(&fx.deps, reservation.id).await.unwrap();
    assert_eq!(stored, reservation);
}

#[tokio::test]
async fn test_create_reservation_user_not_found() {
    let fx = fixture();
    let cmd = CreateReservation {
        user_id: UserId::new(99),
        ..create_cmd(7, date(2024, 3, 1))
    };

    let err = create_reservation(&fx.deps, cmd).await.unwrap_err();

    assert!(matches!(
        err,
        ReservationApplicationError::UserNotFound(id) if id == UserId::new(99)
    ));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fx.store.writes(), 0);
    assert_eq!(fx.inventory.decrease_calls(), 0);
}

#[tokio::test]
async fn test_create_reservation_book_not_found() {
    let fx = fixture();
    let cmd = CreateReservation {
        book_external_id: BookExternalId::new(1),
        ..create_cmd(7, date(2024, 3, 1))
    };

    let err = create_reservation(&fx.deps, cmd).await.unwrap_err();

    assert!(matches!(err, ReservationApplicationError::BookNotFound(_)));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fx.store.writes(), 0);
}

#[tokio::test]
async fn test_create_reservation_book_not_available() {
    // Arrange: no copies left
    let fx = fixture();
    fx.inventory.add_book(test_book(0));

    // Act
    let err = create_reservation(&fx.deps, create_cmd(7, date(2024, 3, 1)))
        .await
        .unwrap_err();

    // Assert: InvalidState, no store write, no inventory mutation
    assert!(matches!(err, ReservationApplicationError::BookNotAvailable(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(fx.store.writes(), 0);
    assert_eq!(fx.inventory.decrease_calls(), 0);
    assert_eq!(fx.inventory.available_quantity(BookExternalId::new(BOOK_ID)), Some(0));
}

#[tokio::test]
async fn test_create_reservation_rejects_non_positive_rental_days() {
    let fx = fixture();

    for days in [0, -1] {
        let err = create_reservation(&fx.deps, create_cmd(days, date(2024, 3, 1)))
            .await
            .unwrap_err();

        assert!(matches!(err, ReservationApplicationError::InvalidRentalDays(d) if d == days));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    assert_eq!(fx.store.writes(), 0);
    assert_eq!(fx.inventory.decrease_calls(), 0);
}

#[tokio::test]
async fn test_create_reservation_rejects_book_without_price() {
    let fx = fixture();
    fx.inventory.add_book(Book {
        price: None,
        ..test_book(3)
    });

    let err = create_reservation(&fx.deps, create_cmd(7, date(2024, 3, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, ReservationApplicationError::MissingDailyRate(_)));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(fx.store.writes(), 0);
}

#[tokio::test]
async fn test_create_reservation_takes_the_last_copy() {
    let fx = fixture();
    fx.inventory.add_book(test_book(1));

    reserve(&fx, 3, date(2024, 3, 1)).await;
    let err = create_reservation(&fx.deps, create_cmd(3, date(2024, 3, 1)))
        .await
        .unwrap_err();

    assert!(matches!(err, ReservationApplicationError::BookNotAvailable(_)));
    assert_eq!(fx.inventory.decrease_calls(), 1);
    assert_eq!(fx.store.writes(), 1);
}

#[tokio::test]
async fn test_create_reservation_removed_when_inventory_fails() {
    // Arrange: the decrement fails after the insert
    let fx = fixture();
    fx.inventory.fail_adjustments(true);

    // Act
    let err = create_reservation(&fx.deps, create_cmd(7, date(2024, 3, 1)))
        .await
        .unwrap_err();

    // Assert: collaborator error, the inserted reservation is gone
    assert!(matches!(err, ReservationApplicationError::BookInventoryError(_)));
    assert_eq!(err.kind(), ErrorKind::Collaborator);
    assert_eq!(fx.inventory.decrease_calls(), 1);
    assert_eq!(fx.inventory.available_quantity(BookExternalId::new(BOOK_ID)), Some(5));
    assert!(get_all_reservations(&fx.deps).await.unwrap().is_empty());

    let lookup = get_reservation_by_id(&fx.deps, ReservationId::new(1))
        .await
        .unwrap_err();
    assert_eq!(lookup.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_create_reservation_total_fee_has_two_places() {
    let fx = fixture();
    fx.inventory.add_book(Book {
        price: Some(dec!(10)),
        ..test_book(5)
    });

    let reservation = reserve(&fx, 7, date(2024, 3, 1)).await;

    assert_eq!(reservation.total_fee.to_string(), "70.00");
}

// ============================================================================
// return_book
// ============================================================================

#[tokio::test]
async fn test_return_book_on_time() {
    let fx = fixture();
    let reservation = reserve(&fx, 7, date(2024, 3, 1)).await;

    let returned = return_book(&fx.deps, return_cmd(&reservation, reservation.expected_return_date))
        .await
        .unwrap();

    assert_eq!(returned.status, ReservationStatus::Returned);
    assert_eq!(returned.late_fee, Some(dec!(0.00)));
    assert_eq!(returned.actual_return_date, Some(date(2024, 3, 8)));
    assert_eq!(fx.inventory.increase_calls(), 1);
    assert_eq!(fx.inventory.available_quantity(BookExternalId::new(BOOK_ID)), Some(5));
}

#[tokio::test]
async fn test_return_book_early() {
    let fx = fixture();
    let reservation = reserve(&fx, 7, date(2024, 3, 1)).await;

    let returned = return_book(&fx.deps, return_cmd(&reservation, date(2024, 3, 4)))
        .await
        .unwrap();

    assert_eq!(returned.status, ReservationStatus::Returned);
    assert_eq!(returned.late_fee, Some(Decimal::ZERO));
}

#[tokio::test]
async fn test_return_book_overdue() {
    // Arrange: expected return 2024-03-08, returned three days later
    let fx = fixture();
    let reservation = reserve(&fx, 7, date(2024, 3, 1)).await;
    let return_date = reservation.expected_return_date + Days::new(3);

    // Act
    let returned = return_book(&fx.deps, return_cmd(&reservation, return_date))
        .await
        .unwrap();

    // Assert: 15.99 * 0.15 * 3 = 7.1955 -> 7.20
    assert_eq!(returned.status, ReservationStatus::Overdue);
    assert_eq!(returned.late_fee, Some(dec!(7.20)));
    assert_eq!(returned.total_fee, dec!(111.93));
    assert_eq!(returned.actual_return_date, Some(return_date));
    assert_eq!(fx.inventory.increase_calls(), 1);

    let stored = get_reservation_by_id(&fx.deps, reservation.id).await.unwrap();
    assert_eq!(stored.status, ReservationStatus::Overdue);
}

#[tokio::test]
async fn test_return_book_late_fee_uses_current_price() {
    // Arrange: reserved at 15.99, catalog price raised before the return
    let fx = fixture();
    let reservation = reserve(&fx, 7, date(2024, 3, 1)).await;
    fx.inventory.add_book(Book {
        price: Some(dec!(20.00)),
        ..test_book(4)
    });

    // Act: three days late
    let returned = return_book(&fx.deps, return_cmd(&reservation, date(2024, 3, 11)))
        .await
        .unwrap();

    // Assert: 20.00 * 0.15 * 3 = 9.00, the rental itself keeps its fees
    assert_eq!(returned.status, ReservationStatus::Overdue);
    assert_eq!(returned.late_fee, Some(dec!(9.00)));
    assert_eq!(returned.daily_rate, dec!(15.99));
    assert_eq!(returned.total_fee, dec!(111.93));
}

#[tokio::test]
async fn test_return_book_late_fee_falls_back_to_daily_rate() {
    let fx = fixture();
    let reservation = reserve(&fx, 7, date(2024, 3, 1)).await;
    fx.inventory.add_book(Book {
        price: None,
        ..test_book(4)
    });

    let returned = return_book(&fx.deps, return_cmd(&reservation, date(2024, 3, 11)))
        .await
        .unwrap();

    assert_eq!(returned.late_fee, Some(dec!(7.20)));
}

#[tokio::test]
async fn test_return_book_restored_when_inventory_fails() {
    // Arrange
    let fx = fixture();
    let reservation = reserve(&fx, 7, date(2024, 3, 1)).await;
    fx.inventory.fail_adjustments(true);

    // Act
    let err = return_book(&fx.deps, return_cmd(&reservation, date(2024, 3, 11)))
        .await
        .unwrap_err();

    // Assert: collaborator error, reservation still ACTIVE, no copy back
    assert!(matches!(err, ReservationApplicationError::BookInventoryError(_)));
    assert_eq!(err.kind(), ErrorKind::Collaborator);
    assert_eq!(fx.inventory.available_quantity(BookExternalId::new(BOOK_ID)), Some(4));

    let stored = get_reservation_by_id(&fx.deps, reservation.id).await.unwrap();
    assert_eq!(stored, reservation);

    // once inventory recovers the return goes through
    fx.inventory.fail_adjustments(false);
    let returned = return_book(&fx.deps, return_cmd(&reservation, date(2024, 3, 11)))
        .await
        .unwrap();
    assert_eq!(returned.status, ReservationStatus::Overdue);
    assert_eq!(fx.inventory.available_quantity(BookExternalId::new(BOOK_ID)), Some(5));
}

#[tokio::test]
async fn test_return_book_not_found() {
    let fx = fixture();

    let err = return_book(
        &fx.deps,
        ReturnBook {
            reservation_id: ReservationId::new(42),
            return_date: date(2024, 3, 8),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ReservationApplicationError::ReservationNotFound(id) if id == ReservationId::new(42)
    ));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fx.inventory.increase_calls(), 0);
}

#[tokio::test]
async fn test_return_book_twice_fails_and_leaves_state_unchanged() {
    let fx = fixture();
    let reservation = reserve(&fx, 7, date(2024, 3, 1)).await;
    let first = return_book(&fx.deps, return_cmd(&reservation, date(2024, 3, 10)))
        .await
        .unwrap();
    let writes_before = fx.store.writes();

    let err = return_book(&fx.deps, return_cmd(&reservation, date(2024, 3, 20)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ReservationApplicationError::ReservationAlreadyFinalized {
            status: ReservationStatus::Overdue,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert_eq!(fx.store.writes(), writes_before);
    assert_eq!(fx.inventory.increase_calls(), 1);

    let stored = get_reservation_by_id(&fx.deps, reservation.id).await.unwrap();
    assert_eq!(stored, first);
}

// ============================================================================
// queries
// ============================================================================

#[tokio::test]
async fn test_get_reservation_by_id_not_found() {
    let fx = fixture();

    let err = get_reservation_by_id(&fx.deps, ReservationId::new(1))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_listings() {
    // Arrange: two users, three reservations, one of them returned
    let fx = fixture();
    fx.directory.add_user(User {
        id: UserId::new(2),
        name: "Ana Gómez".to_string(),
        email: "ana@example.com".to_string(),
    });

    let first = reserve(&fx, 7, date(2024, 3, 1)).await;
    let second = reserve(&fx, 14, date(2024, 3, 2)).await;
    let third = create_reservation(
        &fx.deps,
        CreateReservation {
            user_id: UserId::new(2),
            ..create_cmd(5, date(2024, 3, 3))
        },
    )
    .await
    .unwrap();
    return_book(&fx.deps, return_cmd(&first, date(2024, 3, 8)))
        .await
        .unwrap();

    // Act + Assert
    let all = get_all_reservations(&fx.deps).await.unwrap();
    assert_eq!(
        all.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![first.id, second.id, third.id]
    );

    let by_user = get_reservations_by_user_id(&fx.deps, UserId::new(USER_ID))
        .await
        .unwrap();
    assert_eq!(
        by_user.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );

    let by_other_user = get_reservations_by_user_id(&fx.deps, UserId::new(2))
        .await
        .unwrap();
    assert_eq!(by_other_user.len(), 1);
    assert_eq!(by_other_user[0].user_name, "Ana Gómez");

    let active = get_active_reservations(&fx.deps).await.unwrap();
    assert_eq!(
        active.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![second.id, third.id]
    );

    let none = get_reservations_by_user_id(&fx.deps, UserId::new(77))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_overdue_query_returns_only_active_past_due() {
    // Arrange
    let fx = fixture();
    // expected 2024-03-08, still out
    let late_and_out = reserve(&fx, 7, date(2024, 3, 1)).await;
    // expected 2024-03-15, still out
    let not_yet_due = reserve(&fx, 10, date(2024, 3, 5)).await;
    // expected 2024-03-04, returned late: OVERDUE status, not in the query
    let returned_late = reserve(&fx, 3, date(2024, 3, 1)).await;
    return_book(&fx.deps, return_cmd(&returned_late, date(2024, 3, 6)))
        .await
        .unwrap();

    // Act
    let overdue = get_overdue_reservations_as_of(&fx.deps, date(2024, 3, 10))
        .await
        .unwrap();

    // Assert
    assert_eq!(
        overdue.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![late_and_out.id]
    );
    assert!(overdue.iter().all(|r| r.status == ReservationStatus::Active));

    // due today is not overdue yet
    let on_due_date = get_overdue_reservations_as_of(&fx.deps, date(2024, 3, 15))
        .await
        .unwrap();
    assert!(!on_due_date.iter().any(|r| r.id == not_yet_due.id));
}

#[tokio::test]
async fn test_overdue_query_uses_today() {
    let fx = fixture();
    reserve(&fx, 1, date(2000, 1, 1)).await;

    let overdue = get_overdue_reservations(&fx.deps).await.unwrap();

    assert_eq!(overdue.len(), 1);
}
