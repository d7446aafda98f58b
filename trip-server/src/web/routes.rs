//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::domain::{PlanError, VehicleProfile};
use crate::mapquest::{MapQuestError, RouteGeometry};
use crate::planner::{self, StopPlan};
use crate::store::{NewRoute, RouteId, StoredStop};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/routes", post(plan_route).get(list_routes))
        .route("/api/routes/:id", get(get_route).delete(delete_route))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan a route with optimal fuel stops and store the result.
async fn plan_route(
    State(state): State<AppState>,
    Json(req): Json<PlanRouteRequest>,
) -> Result<Response, AppError> {
    let start = req.start_location.trim();
    let end = req.end_location.trim();
    if start.is_empty() || end.is_empty() {
        return Err(AppError::BadRequest {
            message: "start_location and end_location must be non-empty".to_string(),
        });
    }

    let profile = match (req.tank_capacity_gal, req.mpg) {
        (None, None) => state.config.default_vehicle,
        (tank, mpg) => {
            let defaults = &state.config.default_vehicle;
            VehicleProfile::new(
                tank.unwrap_or(defaults.tank_capacity_gal),
                mpg.unwrap_or(defaults.mpg),
            )
            .map_err(AppError::from)?
        }
    };

    // Both geocodes are independent of the route lookup only in
    // principle; MapQuest routes on free text, so the coordinates are
    // purely for the stored record.
    let (start_coords, end_coords) = {
        let (s, e) = tokio::join!(state.mapquest.geocode(start), state.mapquest.geocode(end));
        (s.map_err(AppError::from)?, e.map_err(AppError::from)?)
    };

    let geometry = state
        .mapquest
        .get_route(start, end)
        .await
        .map_err(AppError::from)?;

    let stations = state.catalog.snapshot().await;
    let plan = planner::plan_stops(
        &geometry.waypoints,
        &stations,
        &profile,
        state.config.max_lateral_miles,
    )
    .map_err(AppError::from)?;

    let record = state
        .store
        .insert(assemble_route(
            start.to_string(),
            end.to_string(),
            start_coords,
            end_coords,
            &geometry,
            &plan,
        ))
        .await;

    tracing::info!(
        route_id = %record.id,
        stops = record.stops.len(),
        total_cost = %record.total_fuel_cost,
        "planned route"
    );

    Ok((StatusCode::OK, Json(RouteResponse::from_record(&record))).into_response())
}

/// Build the stored route from resolved geometry and a stop plan.
fn assemble_route(
    start_location: String,
    end_location: String,
    start_coords: crate::domain::Coord,
    end_coords: crate::domain::Coord,
    geometry: &RouteGeometry,
    plan: &StopPlan,
) -> NewRoute {
    let stops = plan
        .stops
        .iter()
        .map(|stop| StoredStop {
            station_id: stop.station.id,
            name: stop.station.name.clone(),
            price_per_gallon: stop.station.price_per_gallon,
            gallons: stop.gallons,
            cost: stop.cost.round_dp(2),
            distance_miles: stop.distance_miles,
            position: stop.station.position,
        })
        .collect();

    NewRoute {
        start_location,
        end_location,
        start_coords,
        end_coords,
        total_distance_miles: geometry.distance_miles,
        total_fuel_cost: plan.total_cost,
        stops,
        waypoints: geometry.waypoints.clone(),
    }
}

/// List all stored routes, newest first.
async fn list_routes(State(state): State<AppState>) -> Json<RouteListResponse> {
    let routes = state
        .store
        .list()
        .await
        .iter()
        .map(|record| RouteResponse::from_record(record))
        .collect();

    Json(RouteListResponse { routes })
}

/// Fetch a stored route by id.
async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<RouteResponse>, AppError> {
    let record = state
        .store
        .get(RouteId(id))
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("Route with id {id} not found"),
        })?;

    Ok(Json(RouteResponse::from_record(&record)))
}

/// Delete a stored route.
async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    if state.store.delete(RouteId(id)).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound {
            message: format!("Route with id {id} not found"),
        })
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The route exists but no feasible fuel plan does.
    Unprocessable { message: String },
    /// Upstream routing/geocoding provider failed.
    Upstream { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidInput(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            PlanError::Infeasible { .. } => AppError::Unprocessable {
                message: e.to_string(),
            },
        }
    }
}

impl From<MapQuestError> for AppError {
    fn from(e: MapQuestError) -> Self {
        match e {
            MapQuestError::NoResults(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            MapQuestError::Http(_)
            | MapQuestError::ApiError { .. }
            | MapQuestError::RateLimited
            | MapQuestError::Unauthorized
            | MapQuestError::Json { .. }
            | MapQuestError::Conversion(_) => AppError::Upstream {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, Station, StationId};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    #[test]
    fn plan_error_mapping() {
        let err: AppError = PlanError::InvalidInput("bad".to_string()).into();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let err: AppError = PlanError::Infeasible {
            gap_start: 0.0,
            gap_end: 700.0,
            max_range: 500.0,
        }
        .into();
        assert!(matches!(err, AppError::Unprocessable { .. }));
    }

    #[test]
    fn mapquest_error_mapping() {
        let err: AppError = MapQuestError::NoResults("address: nowhere".to_string()).into();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let err: AppError = MapQuestError::RateLimited.into();
        assert!(matches!(err, AppError::Upstream { .. }));

        let err: AppError = MapQuestError::ApiError {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream { .. }));
    }

    #[test]
    fn assemble_route_rounds_stop_costs() {
        let station = Arc::new(Station {
            id: StationId(1),
            name: "STOP".to_string(),
            address: String::new(),
            city: String::new(),
            state: "OK".to_string(),
            rack_id: 1,
            price_per_gallon: "3.333".parse().unwrap(),
            position: Coord::new(35.0, -95.0).unwrap(),
        });

        let plan = StopPlan {
            stops: vec![crate::planner::FuelStop {
                station: station.clone(),
                distance_miles: 100.0,
                gallons: 10.0,
                cost: "33.3333".parse().unwrap(),
            }],
            total_cost: "33.33".parse().unwrap(),
        };
        let geometry = RouteGeometry {
            waypoints: vec![
                Coord::new(34.0, -95.0).unwrap(),
                Coord::new(36.0, -95.0).unwrap(),
            ],
            distance_miles: 140.0,
        };

        let route = assemble_route(
            "A".to_string(),
            "B".to_string(),
            geometry.waypoints[0],
            geometry.waypoints[1],
            &geometry,
            &plan,
        );

        assert_eq!(route.stops[0].cost, Decimal::new(3333, 2));
        assert_eq!(route.total_distance_miles, 140.0);
        assert_eq!(route.waypoints.len(), 2);
    }
}
