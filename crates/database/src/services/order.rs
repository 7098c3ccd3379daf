use crate::{
    entities::{cinema_halls, movie_sessions, orders, tickets, users},
    error::{ServiceError, ServiceResult},
    services::UserService,
};
use chrono::{NaiveDateTime, Utc};
use log::{debug, info, warn};
use models::requests::TicketRequest;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, TransactionTrait,
};

pub struct OrderService;

impl OrderService {
    /// Create an order and all of its tickets atomically
    ///
    /// If any ticket fails validation or hits an already booked seat, the
    /// order row and every ticket inserted so far are rolled back.
    pub async fn create_order(
        db: &DatabaseConnection,
        ticket_requests: Vec<TicketRequest>,
        username: &str,
        created_at: Option<NaiveDateTime>,
    ) -> ServiceResult<orders::Model> {
        let txn = db.begin().await?;

        match Self::insert_order(&txn, &ticket_requests, username, created_at).await {
            Ok(order) => {
                txn.commit().await?;
                info!(
                    "Created order {} for {username} with {} tickets",
                    order.id,
                    ticket_requests.len()
                );
                Ok(order)
            }
            Err(err) => {
                warn!("Order for {username} rolled back: {err}");
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("Rollback of order for {username} failed: {rollback_err}");
                }
                Err(err)
            }
        }
    }

    async fn insert_order(
        txn: &DatabaseTransaction,
        ticket_requests: &[TicketRequest],
        username: &str,
        created_at: Option<NaiveDateTime>,
    ) -> ServiceResult<orders::Model> {
        let user = UserService::get_user_by_username(txn, username).await?;

        let order = orders::ActiveModel {
            user_id: Set(user.id),
            created_at: Set(created_at.unwrap_or_else(|| Utc::now().naive_utc())),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        for request in ticket_requests {
            Self::create_ticket(txn, request.movie_session, order.id, request.row, request.seat)
                .await?;
        }

        Ok(order)
    }

    /// Validate and persist one ticket
    ///
    /// This is the only path that inserts tickets, so every ticket is checked
    /// against the hall of its session before it is written.
    pub async fn create_ticket<C: ConnectionTrait>(
        db: &C,
        movie_session_id: i32,
        order_id: i32,
        row: i32,
        seat: i32,
    ) -> ServiceResult<tickets::Model> {
        let (session, hall) = movie_sessions::Entity::find_by_id(movie_session_id)
            .find_also_related(cinema_halls::Entity)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("movie session", movie_session_id))?;
        let hall =
            hall.ok_or_else(|| ServiceError::not_found("cinema hall", session.cinema_hall_id))?;

        hall.geometry().validate(row, seat)?;

        let ticket = tickets::ActiveModel {
            movie_session_id: Set(session.id),
            order_id: Set(order_id),
            row: Set(row),
            seat: Set(seat),
            ..Default::default()
        }
        .insert(db)
        .await?;

        debug!("Booked row {row} seat {seat} of session {movie_session_id} for order {order_id}");
        Ok(ticket)
    }

    /// All orders, or the orders of one user, newest first
    pub async fn get_orders<C: ConnectionTrait>(
        db: &C,
        username: Option<&str>,
    ) -> ServiceResult<Vec<orders::Model>> {
        let mut query = orders::Entity::find();

        if let Some(username) = username {
            query = query
                .join(JoinType::InnerJoin, orders::Relation::User.def())
                .filter(users::Column::Username.eq(username));
        }

        Ok(query
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn get_order_tickets<C: ConnectionTrait>(
        db: &C,
        order_id: i32,
    ) -> ServiceResult<Vec<tickets::Model>> {
        Ok(tickets::Entity::find()
            .filter(tickets::Column::OrderId.eq(order_id))
            .order_by_asc(tickets::Column::Id)
            .all(db)
            .await?)
    }

    /// `(row, seat)` pairs already booked for a session
    pub async fn get_taken_seats<C: ConnectionTrait>(
        db: &C,
        movie_session_id: i32,
    ) -> ServiceResult<Vec<(i32, i32)>> {
        Ok(tickets::Entity::find()
            .select_only()
            .column(tickets::Column::Row)
            .column(tickets::Column::Seat)
            .filter(tickets::Column::MovieSessionId.eq(movie_session_id))
            .order_by_asc(tickets::Column::Row)
            .order_by_asc(tickets::Column::Seat)
            .into_tuple()
            .all(db)
            .await?)
    }
}
