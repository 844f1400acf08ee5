use bookstore_app::{
    database::{self, Db},
    domain::catalog::{
        CatalogService, PgCatalogService,
        classification::{BookFormat, BookGenre},
        data::NewBook,
        records::BookUuid,
    },
};
use clap::Args;
use jiff::Timestamp;
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct CreateBookArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    author: String,

    /// Unit price, e.g. 12.99
    #[arg(long)]
    price: Decimal,

    /// Units on hand
    #[arg(long, default_value_t = 0)]
    stock: u32,

    #[arg(long, default_value = "")]
    isbn: String,

    #[arg(long, default_value = "")]
    description: String,

    /// e.g. fiction, non_fiction, self_help
    #[arg(long, default_value = "other")]
    genre: BookGenre,

    /// e.g. paperback, hardcover, ebook
    #[arg(long, default_value = "other")]
    format: BookFormat,

    /// Publication date (RFC 3339)
    #[arg(long)]
    published_at: Option<Timestamp>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateBookArgs) -> Result<(), String> {
    if args.price.is_sign_negative() {
        return Err("price cannot be negative".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let book = PgCatalogService::new(Db::new(pool))
        .create_book(NewBook {
            uuid: BookUuid::new(),
            title: args.title,
            author: args.author,
            isbn: args.isbn,
            description: args.description,
            price: args.price,
            stock_quantity: args.stock,
            genre: args.genre,
            format: args.format,
            publication_date: args.published_at,
        })
        .await
        .map_err(|error| format!("failed to create book: {error}"))?;

    println!("book_uuid: {}", book.uuid);
    println!("book_title: {}", book.title);
    println!("book_price: {}", book.price);
    println!("book_stock: {}", book.stock_quantity);
    println!("book_genre: {}", book.genre);
    println!("book_format: {}", book.format);

    Ok(())
}
