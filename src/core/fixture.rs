//! Hand-authored data set.
//!
//! Three users, two devices, eight products and two tasks wired together with
//! fixed quantities, so examples and tests see the same numbers every run:
//!
//! | task        | products                                    | device     | users     |
//! |-------------|---------------------------------------------|------------|-----------|
//! | `Order 1`   | Морковь, Эстрагон, Имбирь, Томаты, Картошка | `SKF_2000` | Max, Oleg |
//! | `Order 2`   | Моцарелла, Молоко, Творог                   | `SKF_2004` | Oleg, Kate|

use crate::{
    core::{device, product, task, user},
    entities::{
        device as device_entity, product as product_entity, task as task_entity,
        user as user_entity,
    },
    errors::Result,
};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

const USERS: [(&str, i64); 3] = [
    ("Max", 574_732_477),
    ("Oleg", 646_567_475),
    ("Kate", 646_567_474),
];

const DEVICES: [(&str, &str); 2] = [
    ("SKF_2000", "Я прибор, а не документ"),
    ("SKF_2004", "I AM ROBOT"),
];

/// Name, barcode, price and the quantity used by its task.
const PRODUCTS: [(&str, i64, i64, i64); 8] = [
    ("Морковь", 237_200_121, 120, 3),
    ("Эстрагон", 237_200_543, 230, 1),
    ("Имбирь", 237_200_984, 980, 4),
    ("Томаты", 237_201_832, 320, 1),
    ("Картошка", 237_201_885, 80, 5),
    ("Моцарелла", 237_201_890, 570, 2),
    ("Молоко", 237_201_820, 210, 0),
    ("Творог", 237_201_853, 340, 5),
];

/// Products `0..FIRST_TASK_PRODUCTS` go to the first task, the rest to the second.
const FIRST_TASK_PRODUCTS: usize = 5;

/// Everything [`load_fixture`] inserted.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Max, Oleg, Kate
    pub users: Vec<user_entity::Model>,
    /// `SKF_2000`, `SKF_2004`
    pub devices: Vec<device_entity::Model>,
    /// The eight products, in declaration order
    pub products: Vec<product_entity::Model>,
    /// `Order 1`, `Order 2`
    pub tasks: Vec<task_entity::Model>,
}

/// Inserts the fixture in one transaction and returns the created rows.
pub async fn load_fixture(db: &DatabaseConnection) -> Result<Fixture> {
    let txn = db.begin().await?;

    let mut users = Vec::with_capacity(USERS.len());
    for (name, password) in USERS {
        users.push(user::create_user(&txn, name, password).await?);
    }

    let mut devices = Vec::with_capacity(DEVICES.len());
    for (name, description) in DEVICES {
        devices.push(device::create_device(&txn, name, description).await?);
    }

    let mut products = Vec::with_capacity(PRODUCTS.len());
    for (name, barcode, price, _) in PRODUCTS {
        products.push(product::create_product(&txn, name, barcode, price).await?);
    }

    let first = task::create_task(&txn, Some("Order 1")).await?;
    let second = task::create_task(&txn, Some("Order 2")).await?;

    for (index, (created, (_, _, _, quantity))) in products.iter().zip(PRODUCTS).enumerate() {
        let owner = if index < FIRST_TASK_PRODUCTS { &first } else { &second };
        task::add_product_to_task(&txn, owner.id, created.id, Some(quantity)).await?;
    }

    task::assign_device_to_task(&txn, first.id, devices[0].id).await?;
    task::assign_device_to_task(&txn, second.id, devices[1].id).await?;

    task::assign_user_to_task(&txn, first.id, users[0].id).await?;
    task::assign_user_to_task(&txn, first.id, users[1].id).await?;
    task::assign_user_to_task(&txn, second.id, users[1].id).await?;
    task::assign_user_to_task(&txn, second.id, users[2].id).await?;

    txn.commit().await?;
    info!("Fixture loaded");

    Ok(Fixture {
        users,
        devices,
        products,
        tasks: vec![first, second],
    })
}
