//! Column shapes repeated across tables.

use sea_orm_migration::prelude::*;

pub fn pk<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

pub fn fk<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).big_integer().not_null().to_owned()
}

pub fn fk_null<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).big_integer().null().to_owned()
}

pub fn text<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).string().not_null().to_owned()
}

pub fn text_null<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).string().null().to_owned()
}

pub fn unique_text<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).string().not_null().unique_key().to_owned()
}

pub fn long_text_null<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).text().null().to_owned()
}

/// `NUMERIC(15, 2)` defaulting to zero.
pub fn money<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .decimal_len(15, 2)
        .not_null()
        .default(0)
        .to_owned()
}

/// `NUMERIC(8, 2)` defaulting to zero.
pub fn hours<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .decimal_len(8, 2)
        .not_null()
        .default(0)
        .to_owned()
}

pub fn rating_null<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).small_integer().null().to_owned()
}

pub fn flag<T: IntoIden + 'static>(name: T, default: bool) -> ColumnDef {
    ColumnDef::new(name)
        .boolean()
        .not_null()
        .default(default)
        .to_owned()
}

pub fn timestamp_null<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name).timestamp_with_time_zone().null().to_owned()
}

pub fn timestamp_now<T: IntoIden + 'static>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}
