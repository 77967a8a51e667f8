//! Inventory ledger engine
//!
//! Every quantity change in the warehouse flows through this service. It
//! keeps three things consistent inside a single database transaction:
//!
//! 1. the `materials` row (how much of a stock item sits at a location),
//! 2. the `prices` cost lots (which deliveries that quantity came from,
//!    consumed in FIFO order by `price_id`),
//! 3. the `transactions_log` audit trail (one row per lot touched, signed).
//!
//! Materials are locked with `SELECT ... FOR UPDATE` before any arithmetic,
//! so concurrent operations on the same material serialize at the database.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A material row: a quantity of one stock item, for one owner, at one
/// location (or off-shelf when `location_id` is NULL).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Material {
    pub material_id: i32,
    pub stock_id: String,
    pub location_id: Option<i32>,
    pub customer_id: i32,
    pub program_id: Option<i32>,
    pub material_type: String,
    pub description: String,
    pub notes: String,
    pub quantity: i32,
    pub min_required_quantity: i32,
    pub max_required_quantity: i32,
    pub status: String,
    pub owner: String,
    pub is_primary: bool,
    pub serial_number_range: String,
}

/// A cost lot: a remaining quantity acquired at one unit cost.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CostLot {
    pub price_id: i32,
    pub material_id: i32,
    pub quantity: i32,
    pub cost: Decimal,
}

/// One planned draw against a cost lot.
#[derive(Debug, Clone, PartialEq)]
pub struct LotDraw {
    pub price_id: i32,
    pub quantity: i32,
    pub cost: Decimal,
}

/// A quantity actually consumed from a lot, carried forward so the
/// destination of a move can be credited at the same cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumedLot {
    pub quantity: i32,
    pub cost: Decimal,
}

/// What happens to a material row when quantity is drained from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Some quantity remains at the location.
    Partial { remaining: i32 },
    /// The row is fully emptied.
    Emptied,
}

#[derive(Debug, Deserialize)]
pub struct ReceiveMaterialInput {
    pub incoming_material_id: i32,
    pub location_id: i32,
    pub quantity: i32,
    pub notes: Option<String>,
    pub serial_number_range: Option<String>,
    /// Overrides the shipment's flag when given.
    pub is_primary: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct MoveMaterialInput {
    pub location_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct RemoveMaterialInput {
    pub quantity: i32,
    pub job_ticket: String,
    pub reason_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustMaterialInput {
    pub is_primary: Option<bool>,
    pub quantity_change: Option<i32>,
    pub job_ticket: Option<String>,
}

/// Incoming shipment row, locked while a receive drains it.
#[derive(Debug, sqlx::FromRow)]
struct IntakeRow {
    incoming_material_id: i32,
    customer_id: i32,
    program_id: Option<i32>,
    stock_id: String,
    material_type: String,
    description: String,
    quantity: i32,
    cost: Decimal,
    min_required_quantity: i32,
    max_required_quantity: i32,
    owner: String,
    is_primary: bool,
}

/// Decide what a drain of `requested` does to a row holding `on_hand`.
///
/// Over-draining is rejected before any row is touched.
pub fn drain_outcome(on_hand: i32, requested: i32) -> AppResult<DrainOutcome> {
    use std::cmp::Ordering;

    match requested.cmp(&on_hand) {
        Ordering::Less => Ok(DrainOutcome::Partial {
            remaining: on_hand - requested,
        }),
        Ordering::Equal => Ok(DrainOutcome::Emptied),
        Ordering::Greater => Err(AppError::InsufficientQuantity {
            requested,
            on_hand,
        }),
    }
}

/// Plan FIFO consumption of `quantity` against `lots`.
///
/// Lots must already be ordered oldest-first (`price_id` ascending). The
/// plan draws each lot down to zero before touching the next, so the sum
/// of the draws equals `quantity` whenever the lots hold enough.
pub fn plan_consumption(lots: &[CostLot], mut quantity: i32) -> Vec<LotDraw> {
    let mut draws = Vec::new();

    for lot in lots {
        if quantity <= 0 {
            break;
        }
        if lot.quantity <= 0 {
            continue;
        }

        let take = quantity.min(lot.quantity);
        draws.push(LotDraw {
            price_id: lot.price_id,
            quantity: take,
            cost: lot.cost,
        });
        quantity -= take;
    }

    draws
}

#[derive(Clone)]
pub struct LedgerService {
    db: PgPool,
}

impl LedgerService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Accept quantity from an incoming shipment onto a warehouse location.
    ///
    /// Finds or creates the material row for (stock, location, owner),
    /// credits a cost lot at the shipment's unit cost, drains the shipment
    /// (deleting it when fully accepted) and logs the positive leg.
    /// Returns the id of the material row that absorbed the quantity.
    pub async fn receive(&self, input: ReceiveMaterialInput) -> AppResult<i32> {
        if input.quantity < 1 {
            return Err(AppError::validation(
                "quantity",
                "Quantity must be at least 1",
            ));
        }

        let mut tx = self.db.begin().await?;

        let intake = sqlx::query_as::<_, IntakeRow>(
            r#"
            SELECT incoming_material_id, customer_id, program_id, stock_id,
                   material_type::TEXT AS material_type, description,
                   quantity, cost, min_required_quantity, max_required_quantity,
                   owner::TEXT AS owner, is_primary
            FROM incoming_materials
            WHERE incoming_material_id = $1
            FOR UPDATE
            "#,
        )
        .bind(input.incoming_material_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Incoming material".to_string()))?;

        if input.quantity > intake.quantity {
            return Err(AppError::validation(
                "quantity",
                format!(
                    "Cannot accept {} items; the shipment only has {}",
                    input.quantity, intake.quantity
                ),
            ));
        }

        let notes = input.notes.clone().unwrap_or_default();
        let serial_number_range = input.serial_number_range.clone().unwrap_or_default();
        let is_primary = input.is_primary.unwrap_or(intake.is_primary);

        let material_id = self
            .place_material(
                &mut *tx,
                &intake,
                input.location_id,
                input.quantity,
                &notes,
                &serial_number_range,
                is_primary,
            )
            .await?;

        let price_id = upsert_lot(&mut *tx, material_id, input.quantity, intake.cost).await?;

        // Drain the shipment; a fully accepted shipment disappears from the
        // incoming queue.
        match drain_outcome(intake.quantity, input.quantity)? {
            DrainOutcome::Emptied => {
                sqlx::query("DELETE FROM incoming_materials WHERE incoming_material_id = $1")
                    .bind(intake.incoming_material_id)
                    .execute(&mut *tx)
                    .await?;
            }
            DrainOutcome::Partial { remaining } => {
                sqlx::query(
                    "UPDATE incoming_materials SET quantity = $1, updated_at = NOW()
                     WHERE incoming_material_id = $2",
                )
                .bind(remaining)
                .bind(intake.incoming_material_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        record_audit(
            &mut *tx,
            &AuditLeg {
                material_id,
                price_id,
                stock_id: &intake.stock_id,
                quantity_change: input.quantity,
                cost: intake.cost,
                job_ticket: "",
                notes: &notes,
                serial_number_range: &serial_number_range,
                reason_id: None,
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            material_id,
            stock_id = %intake.stock_id,
            quantity = input.quantity,
            "received material onto location"
        );

        Ok(material_id)
    }

    /// Move quantity from one material row to a destination location.
    ///
    /// The source lots are consumed FIFO and mirrored onto the destination
    /// at their original costs, so a move never changes the value of the
    /// inventory. Both legs of every lot share one generated transfer
    /// ticket in the audit log. A fully drained source goes off-shelf.
    pub async fn move_material(&self, material_id: i32, input: MoveMaterialInput) -> AppResult<()> {
        if input.quantity < 1 {
            return Err(AppError::validation(
                "quantity",
                "Quantity must be at least 1",
            ));
        }

        let mut tx = self.db.begin().await?;

        let source = material_for_update(&mut *tx, material_id).await?;

        if source.location_id.is_none() {
            return Err(AppError::validation(
                "material_id",
                "Material is off-shelf and cannot be moved",
            ));
        }

        let outcome = drain_outcome(source.quantity, input.quantity)?;
        let ticket = transfer_ticket();

        // Empty the source first. The same-location case is still
        // consistent: the destination lookup runs after the source row is
        // updated, so it either finds the partially drained row or creates
        // a fresh one when the source went off-shelf.
        let consumed = consume_fifo(
            &mut *tx,
            &source,
            input.quantity,
            &ticket,
            "Moved TO a Location",
            None,
        )
        .await?;

        match outcome {
            DrainOutcome::Emptied => {
                sqlx::query(
                    "UPDATE materials SET quantity = 0, location_id = NULL, updated_at = NOW()
                     WHERE material_id = $1",
                )
                .bind(source.material_id)
                .execute(&mut *tx)
                .await?;
            }
            DrainOutcome::Partial { remaining } => {
                sqlx::query(
                    "UPDATE materials SET quantity = $1, updated_at = NOW()
                     WHERE material_id = $2",
                )
                .bind(remaining)
                .bind(source.material_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        // Credit the destination: merge into the row already at the
        // location, or create one. Off-shelf rows are not reused here;
        // only a receive puts an off-shelf material back on a shelf.
        let dest_id = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE materials
            SET quantity = quantity + $1, updated_at = NOW()
            WHERE stock_id = $2 AND location_id = $3 AND owner = $4::owner
            RETURNING material_id
            "#,
        )
        .bind(input.quantity)
        .bind(&source.stock_id)
        .bind(input.location_id)
        .bind(&source.owner)
        .fetch_optional(&mut *tx)
        .await?;

        let dest_id = match dest_id {
            Some(id) => id,
            None => {
                sqlx::query_scalar::<_, i32>(
                    r#"
                    INSERT INTO materials
                        (stock_id, location_id, customer_id, program_id, material_type,
                         description, notes, quantity, min_required_quantity,
                         max_required_quantity, status, owner, is_primary,
                         serial_number_range)
                    VALUES ($1, $2, $3, $4, $5::material_type, $6, $7, $8, $9, $10,
                            $11, $12::owner, $13, $14)
                    RETURNING material_id
                    "#,
                )
                .bind(&source.stock_id)
                .bind(input.location_id)
                .bind(source.customer_id)
                .bind(source.program_id)
                .bind(&source.material_type)
                .bind(&source.description)
                .bind(&source.notes)
                .bind(input.quantity)
                .bind(source.min_required_quantity)
                .bind(source.max_required_quantity)
                .bind(&source.status)
                .bind(&source.owner)
                .bind(false)
                .bind(&source.serial_number_range)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        // Mirror each consumed lot onto the destination at its source cost.
        for lot in &consumed {
            let dest_price_id = upsert_lot(&mut *tx, dest_id, lot.quantity, lot.cost).await?;

            record_audit(
                &mut *tx,
                &AuditLeg {
                    material_id: dest_id,
                    price_id: dest_price_id,
                    stock_id: &source.stock_id,
                    quantity_change: lot.quantity,
                    cost: lot.cost,
                    job_ticket: &ticket,
                    notes: "Moved FROM a Location",
                    serial_number_range: "",
                    reason_id: None,
                },
            )
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            source_id = source.material_id,
            dest_id,
            quantity = input.quantity,
            %ticket,
            "moved material between locations"
        );

        Ok(())
    }

    /// Consume quantity out of the warehouse against a job ticket.
    ///
    /// Lots are drained FIFO; each drained lot becomes one negative audit
    /// leg carrying the caller's ticket and usage reason. A fully drained
    /// row goes off-shelf, freeing its location and making the row
    /// available for reuse by a later receive.
    pub async fn remove(&self, material_id: i32, input: RemoveMaterialInput) -> AppResult<()> {
        if input.quantity < 1 {
            return Err(AppError::validation(
                "quantity",
                "Quantity must be at least 1",
            ));
        }
        if input.job_ticket.trim().is_empty() {
            return Err(AppError::validation("job_ticket", "Job ticket is required"));
        }

        let mut tx = self.db.begin().await?;

        let material = material_for_update(&mut *tx, material_id).await?;
        let outcome = drain_outcome(material.quantity, input.quantity)?;

        consume_fifo(
            &mut *tx,
            &material,
            input.quantity,
            &input.job_ticket,
            "Removed FROM a Location",
            input.reason_id,
        )
        .await?;

        match outcome {
            DrainOutcome::Emptied => {
                sqlx::query(
                    "UPDATE materials SET quantity = 0, location_id = NULL, updated_at = NOW()
                     WHERE material_id = $1",
                )
                .bind(material.material_id)
                .execute(&mut *tx)
                .await?;
            }
            DrainOutcome::Partial { remaining } => {
                sqlx::query(
                    "UPDATE materials SET quantity = $1, updated_at = NOW()
                     WHERE material_id = $2",
                )
                .bind(remaining)
                .bind(material.material_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            material_id,
            quantity = input.quantity,
            job_ticket = %input.job_ticket,
            "removed material from inventory"
        );

        Ok(())
    }

    /// Correct a material row outside the normal flow.
    ///
    /// Exactly one of the two corrections is accepted per call: flag the
    /// row as the primary row for its stock id, or shift its quantity by a
    /// signed delta. A quantity shift books a zero-cost lot so the lot sum
    /// stays equal to the row quantity, and logs the change.
    pub async fn adjust(&self, material_id: i32, input: AdjustMaterialInput) -> AppResult<()> {
        match (input.is_primary, input.quantity_change) {
            (Some(is_primary), None) => self.set_primary(material_id, is_primary).await,
            (None, Some(delta)) => {
                self.shift_quantity(material_id, delta, input.job_ticket.as_deref().unwrap_or(""))
                    .await
            }
            _ => Err(AppError::validation(
                "input",
                "Provide exactly one of is_primary or quantity_change",
            )),
        }
    }

    async fn set_primary(&self, material_id: i32, is_primary: bool) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let material = material_for_update(&mut *tx, material_id).await?;

        if is_primary {
            // Only one row per stock id may be primary.
            sqlx::query(
                "UPDATE materials SET is_primary = FALSE, updated_at = NOW()
                 WHERE stock_id = $1 AND is_primary",
            )
            .bind(&material.stock_id)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "UPDATE materials SET is_primary = $1, updated_at = NOW() WHERE material_id = $2",
        )
        .bind(is_primary)
        .bind(material.material_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn shift_quantity(
        &self,
        material_id: i32,
        delta: i32,
        job_ticket: &str,
    ) -> AppResult<()> {
        if delta == 0 {
            return Err(AppError::validation(
                "quantity_change",
                "Quantity change must not be zero",
            ));
        }

        let mut tx = self.db.begin().await?;

        let material = material_for_update(&mut *tx, material_id).await?;

        if delta < 0 && material.quantity + delta < 0 {
            return Err(AppError::InsufficientQuantity {
                requested: -delta,
                on_hand: material.quantity,
            });
        }

        sqlx::query(
            "UPDATE materials SET quantity = quantity + $1, updated_at = NOW()
             WHERE material_id = $2",
        )
        .bind(delta)
        .bind(material.material_id)
        .execute(&mut *tx)
        .await?;

        // Corrections do not belong to any delivery, so they book against a
        // zero-cost lot. That lot may go negative for downward corrections.
        let price_id = upsert_lot(&mut *tx, material.material_id, delta, Decimal::ZERO).await?;

        record_audit(
            &mut *tx,
            &AuditLeg {
                material_id: material.material_id,
                price_id,
                stock_id: &material.stock_id,
                quantity_change: delta,
                cost: Decimal::ZERO,
                job_ticket,
                notes: "Quantity Adjusted",
                serial_number_range: "",
                reason_id: None,
            },
        )
        .await?;

        tx.commit().await?;

        tracing::info!(material_id, delta, "adjusted material quantity");

        Ok(())
    }

    /// Find or create the material row absorbing a receive, preferring in
    /// order: the row already at the location, an off-shelf row for the
    /// same stock and owner, a brand new row.
    async fn place_material(
        &self,
        tx: &mut PgConnection,
        intake: &IntakeRow,
        location_id: i32,
        quantity: i32,
        notes: &str,
        serial_number_range: &str,
        is_primary: bool,
    ) -> AppResult<i32> {
        let at_location = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE materials
            SET quantity = quantity + $1,
                notes = CASE WHEN $2 <> '' THEN $2 ELSE notes END,
                updated_at = NOW()
            WHERE stock_id = $3 AND location_id = $4 AND owner = $5::owner
            RETURNING material_id
            "#,
        )
        .bind(quantity)
        .bind(notes)
        .bind(&intake.stock_id)
        .bind(location_id)
        .bind(&intake.owner)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(id) = at_location {
            return Ok(id);
        }

        // Off-shelf rows always hold zero, so incrementing is equivalent to
        // assigning and stays correct when two receives land on the row at
        // once.
        let off_shelf = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE materials
            SET location_id = $1,
                quantity = quantity + $2,
                notes = CASE WHEN $3 <> '' THEN $3 ELSE notes END,
                updated_at = NOW()
            WHERE material_id = (
                SELECT material_id FROM materials
                WHERE stock_id = $4 AND location_id IS NULL AND owner = $5::owner
                ORDER BY material_id
                LIMIT 1
            )
            RETURNING material_id
            "#,
        )
        .bind(location_id)
        .bind(quantity)
        .bind(notes)
        .bind(&intake.stock_id)
        .bind(&intake.owner)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(id) = off_shelf {
            return Ok(id);
        }

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO materials
                (stock_id, location_id, customer_id, program_id, material_type,
                 description, notes, quantity, min_required_quantity,
                 max_required_quantity, status, owner, is_primary,
                 serial_number_range)
            VALUES ($1, $2, $3, $4, $5::material_type, $6, $7, $8, $9, $10,
                    'active', $11::owner, $12, $13)
            RETURNING material_id
            "#,
        )
        .bind(&intake.stock_id)
        .bind(location_id)
        .bind(intake.customer_id)
        .bind(intake.program_id)
        .bind(&intake.material_type)
        .bind(&intake.description)
        .bind(notes)
        .bind(quantity)
        .bind(intake.min_required_quantity)
        .bind(intake.max_required_quantity)
        .bind(&intake.owner)
        .bind(is_primary)
        .bind(serial_number_range)
        .fetch_one(&mut *tx)
        .await?;

        Ok(id)
    }
}

/// Lock and load a material row. Missing rows surface as NotFound.
async fn material_for_update(tx: &mut PgConnection, material_id: i32) -> AppResult<Material> {
    sqlx::query_as::<_, Material>(
        r#"
        SELECT material_id, stock_id, location_id, customer_id, program_id,
               material_type::TEXT AS material_type, description, notes,
               quantity, min_required_quantity, max_required_quantity,
               status, owner::TEXT AS owner, is_primary, serial_number_range
        FROM materials
        WHERE material_id = $1
        FOR UPDATE
        "#,
    )
    .bind(material_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Material".to_string()))
}

/// Load the still-consumable lots for a material, oldest delivery first.
async fn active_lots(tx: &mut PgConnection, material_id: i32) -> AppResult<Vec<CostLot>> {
    let lots = sqlx::query_as::<_, CostLot>(
        "SELECT price_id, material_id, quantity, cost
         FROM prices
         WHERE material_id = $1 AND quantity > 0
         ORDER BY price_id ASC
         FOR UPDATE",
    )
    .bind(material_id)
    .fetch_all(&mut *tx)
    .await?;

    Ok(lots)
}

/// Credit quantity to the lot holding this material at this unit cost,
/// creating the lot on first sight of the cost.
async fn upsert_lot(
    tx: &mut PgConnection,
    material_id: i32,
    quantity: i32,
    cost: Decimal,
) -> AppResult<i32> {
    let price_id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO prices (material_id, quantity, cost)
        VALUES ($1, $2, $3)
        ON CONFLICT (material_id, cost)
        DO UPDATE SET quantity = prices.quantity + EXCLUDED.quantity
        RETURNING price_id
        "#,
    )
    .bind(material_id)
    .bind(quantity)
    .bind(cost)
    .fetch_one(&mut *tx)
    .await?;

    Ok(price_id)
}

/// Apply a signed delta to one lot. Returns the lot's unit cost.
async fn adjust_lot_quantity(
    tx: &mut PgConnection,
    price_id: i32,
    delta: i32,
) -> AppResult<Decimal> {
    sqlx::query_scalar::<_, Decimal>(
        "UPDATE prices SET quantity = quantity + $1 WHERE price_id = $2 RETURNING cost",
    )
    .bind(delta)
    .bind(price_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Cost lot".to_string()))
}

/// Drain `quantity` from a material's lots in FIFO order, logging one
/// negative audit leg per lot touched. Returns the consumed lots so a move
/// can mirror them onto its destination.
async fn consume_fifo(
    tx: &mut PgConnection,
    material: &Material,
    quantity: i32,
    job_ticket: &str,
    notes: &str,
    reason_id: Option<i32>,
) -> AppResult<Vec<ConsumedLot>> {
    let lots = active_lots(&mut *tx, material.material_id).await?;
    let draws = plan_consumption(&lots, quantity);

    let planned: i32 = draws.iter().map(|d| d.quantity).sum();
    if planned < quantity {
        // The row quantity said there was enough but the lots disagree.
        // Surface it as the same error the caller's pre-check raises.
        return Err(AppError::InsufficientQuantity {
            requested: quantity,
            on_hand: planned,
        });
    }

    let mut consumed = Vec::with_capacity(draws.len());
    for draw in draws {
        let cost = adjust_lot_quantity(&mut *tx, draw.price_id, -draw.quantity).await?;

        record_audit(
            &mut *tx,
            &AuditLeg {
                material_id: material.material_id,
                price_id: draw.price_id,
                stock_id: &material.stock_id,
                quantity_change: -draw.quantity,
                cost,
                job_ticket,
                notes,
                serial_number_range: &material.serial_number_range,
                reason_id,
            },
        )
        .await?;

        consumed.push(ConsumedLot {
            quantity: draw.quantity,
            cost,
        });
    }

    Ok(consumed)
}

/// One leg of the audit trail. Every leg names the lot it touched, so the
/// running sum of a lot's legs always reconstructs its quantity.
struct AuditLeg<'a> {
    material_id: i32,
    price_id: i32,
    stock_id: &'a str,
    quantity_change: i32,
    cost: Decimal,
    job_ticket: &'a str,
    notes: &'a str,
    serial_number_range: &'a str,
    reason_id: Option<i32>,
}

async fn record_audit(tx: &mut PgConnection, leg: &AuditLeg<'_>) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO transactions_log
            (material_id, price_id, stock_id, quantity_change, cost, job_ticket,
             notes, serial_number_range, reason_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(leg.material_id)
    .bind(leg.price_id)
    .bind(leg.stock_id)
    .bind(leg.quantity_change)
    .bind(leg.cost)
    .bind(leg.job_ticket)
    .bind(leg.notes)
    .bind(leg.serial_number_range)
    .bind(leg.reason_id)
    .execute(&mut *tx)
    .await?;

    Ok(())
}

/// Ticket stamped on both legs of an internal transfer.
fn transfer_ticket() -> String {
    format!("Auto-Ticket: {}", Uuid::new_v4().simple())
}
