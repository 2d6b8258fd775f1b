//! Randomized bulk row generation.
//!
//! A [`FieldGenerator`] pairs a column with a function producing a value for
//! it. [`generate_rows`] calls every generator once per row, builds `count`
//! rows and writes them in a single transaction. Tasks get their own driver,
//! [`generate_tasks`], because each one owns a random set of product
//! associations that must point at products already in the store.
//!
//! Seeding order matters: users, products and devices first, tasks last.

use crate::{
    config::plan::SeedCounts,
    entities::{
        Device, Product, ProductQuantity, Task, User, device, product, product_quantity, task,
        user,
    },
    errors::{Error, Result},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QuerySelect, Set, TransactionTrait, Value, prelude::Uuid,
};
use std::ops::RangeInclusive;
use tracing::{debug, info, instrument};

/// Rows per INSERT statement, keeping bound parameters well under SQLite's limit.
const INSERT_BATCH_SIZE: usize = 500;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const HEX_DIGITS: &[u8] = b"0123456789abcdefABCDEF";
const LETTERS_AND_SPACE: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ ";

/// Bounds for the product probe used when generating tasks.
const PRODUCT_PROBE_MAX_OFFSET: u64 = 24;
const PRODUCT_PROBE_LIMIT: u64 = 50;
/// Product associations per generated task.
const ASSOCIATIONS_PER_TASK: RangeInclusive<usize> = 1..=15;
/// Quantity range for generated associations.
pub const QUANTITY_RANGE: RangeInclusive<i64> = 0..=99_999;

/// State shared by all generators during a seeding run.
pub struct GenContext {
    /// Source of randomness for every generator
    pub rng: StdRng,
}

impl GenContext {
    /// Creates a context seeded from `seed`, or from OS entropy when `None`.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Random string of `min..=max` characters drawn from `alphabet`.
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn string_from(&mut self, alphabet: &[u8], min: usize, max: usize) -> String {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let len = self.rng.random_range(min..=max);
        (0..len)
            .map(|_| char::from(alphabet[self.rng.random_range(0..alphabet.len())]))
            .collect()
    }
}

/// Produces one column value per call.
pub type Generator = Box<dyn Fn(&mut GenContext) -> Value + Send + Sync>;

/// A column of `E` and the generator filling it.
pub struct FieldGenerator<E: EntityTrait> {
    /// Column being filled
    pub column: E::Column,
    /// Value source
    pub generate: Generator,
}

impl<E: EntityTrait> FieldGenerator<E> {
    /// Pairs a column with its generator.
    pub fn new(column: E::Column, generate: Generator) -> Self {
        Self { column, generate }
    }
}

/// Lowercase ASCII name of `min..=max` letters.
#[must_use]
pub fn lowercase_name(min: usize, max: usize) -> Generator {
    Box::new(move |ctx| Value::from(ctx.string_from(LOWERCASE, min, max)))
}

/// Uniform integer from `range`.
///
/// # Panics
/// The generator panics when called if `range` is empty.
#[must_use]
pub fn random_int(range: RangeInclusive<i64>) -> Generator {
    Box::new(move |ctx| Value::from(ctx.rng.random_range(range.clone())))
}

/// `prefix` followed by `min..=max` hex digits of either case.
#[must_use]
pub fn prefixed_hex(prefix: &'static str, min: usize, max: usize) -> Generator {
    Box::new(move |ctx| {
        let digits = ctx.string_from(HEX_DIGITS, min, max);
        Value::from(format!("{prefix}{digits}"))
    })
}

/// Letters and spaces, `min..=max` characters long.
#[must_use]
pub fn free_text(min: usize, max: usize) -> Generator {
    Box::new(move |ctx| Value::from(ctx.string_from(LETTERS_AND_SPACE, min, max)))
}

/// Generators for users: 7-24 letter names and nine-digit passwords.
#[must_use]
pub fn user_fields() -> Vec<FieldGenerator<User>> {
    vec![
        FieldGenerator::new(user::Column::Name, lowercase_name(7, 24)),
        FieldGenerator::new(user::Column::Password, random_int(100_000_000..=999_999_999)),
    ]
}

/// Generators for products: names, nine-digit barcodes and prices of 20-99999.
#[must_use]
pub fn product_fields() -> Vec<FieldGenerator<Product>> {
    vec![
        FieldGenerator::new(product::Column::Name, lowercase_name(7, 24)),
        FieldGenerator::new(product::Column::Barcode, random_int(100_000_000..=999_999_999)),
        FieldGenerator::new(product::Column::Price, random_int(20..=99_999)),
    ]
}

/// Generators for devices: `SKF_` names and free-text descriptions.
#[must_use]
pub fn device_fields() -> Vec<FieldGenerator<Device>> {
    vec![
        FieldGenerator::new(device::Column::Name, prefixed_hex("SKF_", 3, 12)),
        FieldGenerator::new(device::Column::Description, free_text(24, 170)),
    ]
}

async fn insert_in_batches<E, C>(db: &C, rows: Vec<E::ActiveModel>) -> Result<u64>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    C: ConnectionTrait,
{
    let mut inserted = 0;
    let mut rows = rows.into_iter().peekable();
    while rows.peek().is_some() {
        let batch: Vec<E::ActiveModel> = rows.by_ref().take(INSERT_BATCH_SIZE).collect();
        inserted += E::insert_many(batch).exec_without_returning(db).await?;
    }
    Ok(inserted)
}

/// Generates `count` rows of `E` and commits them in one transaction.
///
/// Every generator in `fields` is called once per row; identifiers come from
/// the entity's `ActiveModelBehavior::new`. Returns the number of rows
/// inserted. If any insert fails nothing is committed.
pub async fn generate_rows<E>(
    db: &DatabaseConnection,
    fields: &[FieldGenerator<E>],
    count: usize,
    ctx: &mut GenContext,
) -> Result<u64>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
{
    if count == 0 {
        return Ok(0);
    }

    let mut rows = Vec::with_capacity(count);
    for _ in 0..count {
        let mut row = <E::ActiveModel as ActiveModelBehavior>::new();
        for field in fields {
            row.set(field.column, (field.generate)(ctx));
        }
        rows.push(row);
    }

    let txn = db.begin().await?;
    let inserted = insert_in_batches::<E, _>(&txn, rows).await?;
    txn.commit().await?;

    debug!("Generated {inserted} rows for `{}`", E::default().table_name());
    Ok(inserted)
}

/// Counts written by [`generate_tasks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSeed {
    /// Tasks inserted
    pub tasks: u64,
    /// Product associations inserted
    pub associations: u64,
}

/// Probes up to 50 product ids starting at a random offset in `1..=24`,
/// wrapped modulo `total_products` so small stores still yield varied pools.
async fn probe_product_ids<C: ConnectionTrait>(
    db: &C,
    total_products: u64,
    ctx: &mut GenContext,
) -> Result<Vec<Uuid>> {
    let offset = ctx.rng.random_range(1..=PRODUCT_PROBE_MAX_OFFSET) % total_products.max(1);

    Product::find()
        .select_only()
        .column(product::Column::Id)
        .offset(offset)
        .limit(PRODUCT_PROBE_LIMIT)
        .into_tuple::<Uuid>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Generates `count` tasks, each owning 1-15 product associations with
/// quantities in `0..=99999` and products sampled from the store.
///
/// # Errors
/// Returns [`Error::NotFound`] without writing anything if the store holds no
/// products.
pub async fn generate_tasks(
    db: &DatabaseConnection,
    count: usize,
    ctx: &mut GenContext,
) -> Result<TaskSeed> {
    if count == 0 {
        return Ok(TaskSeed::default());
    }

    let txn = db.begin().await?;
    let total_products = Product::find().count(&txn).await?;
    if total_products == 0 {
        return Err(Error::not_found("product", "any"));
    }

    let mut tasks = Vec::with_capacity(count);
    let mut associations = Vec::new();
    for _ in 0..count {
        let pool = probe_product_ids(&txn, total_products, ctx).await?;
        if pool.is_empty() {
            return Err(Error::not_found("product", "any"));
        }

        let task_id = Uuid::new_v4();
        tasks.push(task::ActiveModel {
            id: Set(task_id),
            ..task::ActiveModel::new()
        });

        for _ in 0..ctx.rng.random_range(ASSOCIATIONS_PER_TASK) {
            let product_id = pool[ctx.rng.random_range(0..pool.len())];
            associations.push(product_quantity::ActiveModel {
                product_id: Set(product_id),
                task_id: Set(task_id),
                quantity: Set(Some(ctx.rng.random_range(QUANTITY_RANGE))),
                ..product_quantity::ActiveModel::new()
            });
        }
    }

    // Tasks first so the association foreign keys resolve
    let tasks = insert_in_batches::<Task, _>(&txn, tasks).await?;
    let associations = insert_in_batches::<ProductQuantity, _>(&txn, associations).await?;
    txn.commit().await?;

    debug!("Generated {tasks} tasks with {associations} product associations");
    Ok(TaskSeed {
        tasks,
        associations,
    })
}

/// Counts written by [`seed_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Users inserted
    pub users: u64,
    /// Products inserted
    pub products: u64,
    /// Devices inserted
    pub devices: u64,
    /// Tasks and their associations inserted
    pub tasks: TaskSeed,
}

/// Seeds users, products and devices, then tasks referencing the products.
#[instrument(skip(db, ctx))]
pub async fn seed_all(
    db: &DatabaseConnection,
    counts: &SeedCounts,
    ctx: &mut GenContext,
) -> Result<SeedSummary> {
    let users = generate_rows(db, &user_fields(), counts.users, ctx).await?;
    let products = generate_rows(db, &product_fields(), counts.products, ctx).await?;
    let devices = generate_rows(db, &device_fields(), counts.devices, ctx).await?;
    let tasks = generate_tasks(db, counts.tasks, ctx).await?;

    let summary = SeedSummary {
        users,
        products,
        devices,
        tasks,
    };
    info!(?summary, "Seeding finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::task::create_task;
    use crate::entities::{DeviceModel, ProductQuantityModel, UserModel};
    use crate::test_utils::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_lowercase_name_bounds() {
        let mut ctx = GenContext::new(Some(1));
        let generate = lowercase_name(7, 24);
        for _ in 0..500 {
            let Value::String(Some(name)) = generate(&mut ctx) else {
                panic!("expected a string value");
            };
            assert!((7..=24).contains(&name.len()));
            assert!(name.bytes().all(|b| b.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_prefixed_hex_shape() {
        let mut ctx = GenContext::new(Some(2));
        let generate = prefixed_hex("SKF_", 3, 12);
        for _ in 0..200 {
            let Value::String(Some(name)) = generate(&mut ctx) else {
                panic!("expected a string value");
            };
            let digits = name.strip_prefix("SKF_").unwrap();
            assert!((3..=12).contains(&digits.len()));
            assert!(digits.bytes().all(|b| b.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_random_int_range() {
        let mut ctx = GenContext::new(Some(3));
        let generate = random_int(100_000_000..=999_999_999);
        for _ in 0..200 {
            let Value::BigInt(Some(n)) = generate(&mut ctx) else {
                panic!("expected a bigint value");
            };
            assert!((100_000_000..=999_999_999).contains(&n));
        }
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let mut ctx = GenContext::new(Some(6));
        let generate = lowercase_name(12, 4);
        for _ in 0..200 {
            let Value::String(Some(name)) = generate(&mut ctx) else {
                panic!("expected a string value");
            };
            assert!((4..=12).contains(&name.len()));
        }
        assert_eq!(ctx.string_from(LOWERCASE, 3, 3).len(), 3);
    }

    #[test]
    fn test_seeded_context_is_reproducible() {
        let mut a = GenContext::new(Some(42));
        let mut b = GenContext::new(Some(42));
        let generate = free_text(24, 170);
        for _ in 0..20 {
            assert_eq!(generate(&mut a), generate(&mut b));
        }
    }

    #[tokio::test]
    async fn test_generate_150_users() -> Result<()> {
        let db = setup_test_db().await?;
        let mut ctx = GenContext::new(Some(150));

        let inserted = generate_rows(&db, &user_fields(), 150, &mut ctx).await?;
        assert_eq!(inserted, 150);

        let users: Vec<UserModel> = User::find().all(&db).await?;
        assert_eq!(users.len(), 150);
        for user in &users {
            assert!((7..=24).contains(&user.name.len()), "bad name {}", user.name);
            assert!(user.name.bytes().all(|b| b.is_ascii_lowercase()));
            assert!((100_000_000..=999_999_999).contains(&user.password));
        }

        let ids: HashSet<Uuid> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids.len(), 150);
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_devices_in_batches() -> Result<()> {
        let db = setup_test_db().await?;
        let mut ctx = GenContext::new(Some(9));

        // More than one INSERT batch
        let count = INSERT_BATCH_SIZE + 17;
        let inserted = generate_rows(&db, &device_fields(), count, &mut ctx).await?;
        assert_eq!(inserted, count as u64);

        let devices: Vec<DeviceModel> = Device::find().all(&db).await?;
        assert_eq!(devices.len(), count);
        assert!(devices.iter().all(|d| d.name.starts_with("SKF_")));
        assert!(
            devices
                .iter()
                .all(|d| (24..=170).contains(&d.description.len()))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_zero_rows() -> Result<()> {
        let db = setup_test_db().await?;
        let mut ctx = GenContext::new(Some(0));

        assert_eq!(generate_rows(&db, &product_fields(), 0, &mut ctx).await?, 0);
        assert_eq!(Product::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_batch_rolls_back_earlier_batches() -> Result<()> {
        let db = setup_test_db().await?;
        let mut ctx = GenContext::new(Some(8));
        let product = create_test_product(&db, "Творог", 340).await?;
        let task = create_task(&db, Some("Weekly")).await?;

        // Row 550 lands in the second INSERT batch and points at no product
        let bad_row = INSERT_BATCH_SIZE + 50;
        let counter = AtomicUsize::new(0);
        let product_id: Generator = Box::new(move |_: &mut GenContext| {
            if counter.fetch_add(1, Ordering::Relaxed) == bad_row {
                Value::from(Uuid::new_v4())
            } else {
                Value::from(product.id)
            }
        });
        let fields = vec![
            FieldGenerator::<ProductQuantity>::new(product_quantity::Column::ProductId, product_id),
            FieldGenerator::new(
                product_quantity::Column::TaskId,
                Box::new(move |_: &mut GenContext| Value::from(task.id)),
            ),
            FieldGenerator::new(product_quantity::Column::Quantity, random_int(QUANTITY_RANGE)),
        ];

        let result = generate_rows(&db, &fields, INSERT_BATCH_SIZE + 100, &mut ctx).await;

        assert!(matches!(
            result.unwrap_err(),
            Error::ConstraintViolation { .. }
        ));
        assert_eq!(ProductQuantity::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_small_store_gives_varied_pools() -> Result<()> {
        let db = setup_test_db().await?;
        let mut ctx = GenContext::new(Some(10));
        generate_rows(&db, &product_fields(), 10, &mut ctx).await?;

        let mut pool_sizes = HashSet::new();
        for _ in 0..40 {
            let pool = probe_product_ids(&db, 10, &mut ctx).await?;
            assert!(!pool.is_empty());
            pool_sizes.insert(pool.len());
        }
        assert!(pool_sizes.len() > 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_tasks_without_products_fails() -> Result<()> {
        let db = setup_test_db().await?;
        let mut ctx = GenContext::new(Some(5));

        let result = generate_tasks(&db, 3, &mut ctx).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "product",
                ..
            }
        ));
        assert_eq!(Task::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_generated_associations_reference_existing_products() -> Result<()> {
        let db = setup_test_db().await?;
        let mut ctx = GenContext::new(Some(77));

        generate_rows(&db, &product_fields(), 40, &mut ctx).await?;
        let seeded = generate_tasks(&db, 12, &mut ctx).await?;
        assert_eq!(seeded.tasks, 12);

        let product_ids: HashSet<Uuid> = Product::find()
            .all(&db)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        let associations: Vec<ProductQuantityModel> = ProductQuantity::find().all(&db).await?;
        assert_eq!(associations.len() as u64, seeded.associations);

        let mut per_task: HashMap<Uuid, usize> = HashMap::new();
        for association in &associations {
            assert!(product_ids.contains(&association.product_id));
            let quantity = association.quantity.unwrap();
            assert!(QUANTITY_RANGE.contains(&quantity));
            *per_task.entry(association.task_id).or_default() += 1;
        }

        assert_eq!(per_task.len(), 12);
        assert!(per_task.values().all(|n| ASSOCIATIONS_PER_TASK.contains(n)));
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_tasks_with_single_product() -> Result<()> {
        let db = setup_test_db().await?;
        let mut ctx = GenContext::new(Some(11));
        let only = create_test_product(&db, "Картошка", 80).await?;

        generate_tasks(&db, 4, &mut ctx).await?;

        let associations: Vec<ProductQuantityModel> = ProductQuantity::find().all(&db).await?;
        assert!(!associations.is_empty());
        assert!(associations.iter().all(|a| a.product_id == only.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_all_counts() -> Result<()> {
        let db = setup_test_db().await?;
        let mut ctx = GenContext::new(Some(2024));
        let counts = SeedCounts {
            users: 15,
            products: 60,
            devices: 5,
            tasks: 7,
            rng_seed: None,
        };

        let summary = seed_all(&db, &counts, &mut ctx).await?;

        assert_eq!(summary.users, 15);
        assert_eq!(summary.products, 60);
        assert_eq!(summary.devices, 5);
        assert_eq!(summary.tasks.tasks, 7);
        assert_eq!(User::find().count(&db).await?, 15);
        assert_eq!(Product::find().count(&db).await?, 60);
        assert_eq!(Device::find().count(&db).await?, 5);
        assert_eq!(Task::find().count(&db).await?, 7);
        assert_eq!(
            ProductQuantity::find().count(&db).await?,
            summary.tasks.associations
        );
        Ok(())
    }
}
