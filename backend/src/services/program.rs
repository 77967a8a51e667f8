//! Customers and their programs
//!
//! A customer owns materials; a program is the billing bucket reports are
//! broken out by. Contact emails live in their own table so a customer can
//! have several.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct CustomerDetails {
    pub customer_id: i32,
    pub name: String,
    pub emails: Vec<String>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Program {
    pub program_id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub program_name: String,
    pub program_code: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerInput {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub name: String,

    #[serde(default)]
    pub emails: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProgramInput {
    pub customer_id: i32,

    #[validate(length(min = 1, message = "Program name is required"))]
    pub program_name: String,

    #[validate(length(min = 1, message = "Program code is required"))]
    pub program_code: String,
}

#[derive(Clone)]
pub struct ProgramService {
    db: PgPool,
}

impl ProgramService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a customer together with its contact emails.
    pub async fn create_customer(&self, input: CreateCustomerInput) -> AppResult<i32> {
        input.validate()?;

        for email in &input.emails {
            if !email.contains('@') {
                return Err(AppError::validation(
                    "emails",
                    format!("Invalid email address: {}", email),
                ));
            }
        }

        let mut tx = self.db.begin().await?;

        let customer_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO customers (name) VALUES ($1) RETURNING customer_id",
        )
        .bind(&input.name)
        .fetch_one(&mut *tx)
        .await?;

        for email in &input.emails {
            sqlx::query("INSERT INTO customer_emails (customer_id, email) VALUES ($1, $2)")
                .bind(customer_id)
                .bind(email)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(customer_id, name = %input.name, "customer created");

        Ok(customer_id)
    }

    /// Rename a customer and replace its contact emails.
    pub async fn update_customer(
        &self,
        customer_id: i32,
        input: CreateCustomerInput,
    ) -> AppResult<()> {
        input.validate()?;

        for email in &input.emails {
            if !email.contains('@') {
                return Err(AppError::validation(
                    "emails",
                    format!("Invalid email address: {}", email),
                ));
            }
        }

        let mut tx = self.db.begin().await?;

        let result = sqlx::query("UPDATE customers SET name = $1 WHERE customer_id = $2")
            .bind(&input.name)
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Customer".to_string()));
        }

        sqlx::query("DELETE FROM customer_emails WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;

        for email in &input.emails {
            sqlx::query("INSERT INTO customer_emails (customer_id, email) VALUES ($1, $2)")
                .bind(customer_id)
                .bind(email)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// All customers with their emails aggregated.
    pub async fn list_customers(&self) -> AppResult<Vec<CustomerDetails>> {
        let customers = sqlx::query_as::<_, CustomerDetails>(
            r#"
            SELECT c.customer_id, c.name,
                   COALESCE(
                       ARRAY_AGG(e.email) FILTER (WHERE e.email IS NOT NULL),
                       '{}'
                   ) AS emails
            FROM customers c
            LEFT JOIN customer_emails e ON e.customer_id = c.customer_id
            GROUP BY c.customer_id, c.name
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(customers)
    }

    pub async fn create_program(&self, input: CreateProgramInput) -> AppResult<i32> {
        input.validate()?;

        let program_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO customer_programs (customer_id, program_name, program_code)
            VALUES ($1, $2, $3)
            RETURNING program_id
            "#,
        )
        .bind(input.customer_id)
        .bind(&input.program_name)
        .bind(&input.program_code)
        .fetch_one(&self.db)
        .await?;

        Ok(program_id)
    }

    /// Programs, optionally narrowed to one customer.
    pub async fn list_programs(&self, customer_id: Option<i32>) -> AppResult<Vec<Program>> {
        let programs = sqlx::query_as::<_, Program>(
            r#"
            SELECT p.program_id, p.customer_id, c.name AS customer_name,
                   p.program_name, p.program_code
            FROM customer_programs p
            JOIN customers c ON c.customer_id = p.customer_id
            WHERE ($1::INT IS NULL OR p.customer_id = $1)
            ORDER BY c.name, p.program_name
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(programs)
    }
}
