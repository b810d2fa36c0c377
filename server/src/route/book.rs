use application::service::{
    AddBookService, GetBookService, RemoveBookService, ValuateBookService,
};
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{AddBookRequest, BookTransformer, OrderBooksRequest, PriceFilterRequest};
use crate::response::BookPresenter;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<D> BookRouter for Router<AppModule<D>>
where
    D: DependOnBookQuery + DependOnBookModifier,
{
    fn route_book(self) -> Self {
        self.route(
            "/api/book/all",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| module.database().get_all_books())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/api/book/add",
            post(
                |State(module): State<AppModule<D>>,
                 Json(req): Json<Option<AddBookRequest>>| async move {
                    match Controller::new(BookTransformer, BookPresenter).try_intake(req) {
                        Ok(transformed) => transformed
                            .handle(|dto| async move { module.database().add_book(dto).await })
                            .await
                            .map_err(ErrorStatus::from),
                        Err(violations) => Err(ErrorStatus::from(violations)),
                    }
                },
            ),
        )
        .route(
            "/api/book/mostExpensive",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| module.database().get_most_expensive_book())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/api/book/totalValue",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| module.database().get_total_value_of_collection())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/api/book/search/title/:title",
            get(
                |State(module): State<AppModule<D>>, Path(title): Path<String>| async move {
                    Controller::new((), BookPresenter)
                        .bypass(|| module.database().get_book_with_title(&title))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/book/search/id/:id",
            get(
                |State(module): State<AppModule<D>>, Path(id): Path<i64>| async move {
                    Controller::new((), BookPresenter)
                        .bypass(|| module.database().get_book_with_id(id))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/book/search/priceMoreThen",
            get(
                |State(module): State<AppModule<D>>,
                 Query(req): Query<PriceFilterRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|price| async move {
                            module.database().get_books_with_price_more_than(price).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/book/search/inColor",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| module.database().get_books_in_color())
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/api/book/order",
            get(
                |State(module): State<AppModule<D>>,
                 Query(req): Query<OrderBooksRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|(direction, column)| async move {
                            module.database().order_books(&direction, &column).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/book/remove/:title",
            delete(
                |State(module): State<AppModule<D>>, Path(title): Path<String>| async move {
                    Controller::new((), BookPresenter)
                        .bypass(|| module.database().remove_book_with_title(&title))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/api/book/removeById/:id",
            delete(
                |State(module): State<AppModule<D>>, Path(id): Path<i64>| async move {
                    Controller::new((), BookPresenter)
                        .bypass(|| module.database().remove_book_with_id(id))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}

#[cfg(test)]
mod test {
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use driver::database::MemoryDatabase;
    use kernel::prelude::entity::{Book, BookInColor, BookPrice, BookStock, BookTitle};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::handler::AppModule;
    use crate::route::BookRouter;

    fn app() -> Router {
        let db = MemoryDatabase::with_books([
            Book::new(
                BookTitle::new("Harry Potter"),
                BookStock::new(5),
                BookPrice::new(20.07),
                BookInColor::new(false),
            ),
            Book::new(
                BookTitle::new("The Hobbit"),
                BookStock::new(1),
                BookPrice::new(50.5),
                BookInColor::new(true),
            ),
        ]);
        Router::<AppModule<MemoryDatabase>>::new()
            .route_book()
            .with_state(AppModule::new(db))
    }

    async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .expect("valid request");
        let response = app.oneshot(request).await.expect("infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    #[tokio::test]
    async fn lists_books_in_camel_case() {
        let (status, body) = call(app(), Method::GET, "/api/book/all", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Harry Potter");
        assert_eq!(body[0]["numberInStock"], 5);
        assert_eq!(body[1]["inColor"], true);
        assert!(body[1]["priceInDollar"].is_number());
    }

    #[tokio::test]
    async fn adds_a_valid_book() {
        let book = json!({"title": "Jane Eyre", "numberInStock": "4", "price": "33.02", "inColor": true});
        let (status, body) = call(app(), Method::POST, "/api/book/add", Some(book)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Jane Eyre");
        assert_eq!(body["id"], 3);
    }

    #[tokio::test]
    async fn rejects_invalid_attributes_per_field() {
        let book = json!({"title": " ", "numberInStock": 0, "price": 1});
        let (status, body) = call(app(), Method::POST, "/api/book/add", Some(book)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"title": "Title is required", "numberInStock": "Number in stock must be between 1 and 5"})
        );
    }

    #[tokio::test]
    async fn blank_form_number_is_a_field_error() {
        let book = json!({"title": "Dune", "numberInStock": "", "price": "12.5", "inColor": false});
        let (status, body) = call(app(), Method::POST, "/api/book/add", Some(book)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"numberInStock": "Number in stock must be between 1 and 5"})
        );
    }

    #[tokio::test]
    async fn rejects_duplicate_and_null_books() {
        let book = json!({"title": "The Hobbit", "numberInStock": 1, "price": 1});
        let (status, body) = call(app(), Method::POST, "/api/book/add", Some(book)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"title": "Title must be unique"}));

        let (status, body) = call(app(), Method::POST, "/api/book/add", Some(Value::Null)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"book": "Can not add null book"}));
    }

    #[tokio::test]
    async fn statistics() {
        let (status, body) = call(app(), Method::GET, "/api/book/mostExpensive", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "The Hobbit");

        let (_, body) = call(app(), Method::GET, "/api/book/totalValue", None).await;
        let total = body.as_f64().expect("number");
        assert!((total - 150.85).abs() < 1e-9);
    }

    #[tokio::test]
    async fn searches() {
        let (_, body) = call(app(), Method::GET, "/api/book/search/title/The%20Hobbit", None).await;
        assert_eq!(body["title"], "The Hobbit");

        let (status, body) = call(app(), Method::GET, "/api/book/search/title/xy", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"title-filter": "Title must have at least 3 chars"}));

        let (_, body) = call(app(), Method::GET, "/api/book/search/id/9", None).await;
        assert_eq!(body, Value::Null);

        let (_, body) = call(app(), Method::GET, "/api/book/search/priceMoreThen?price=0", None).await;
        assert_eq!(body.as_array().map(Vec::len), Some(2));

        let (status, body) = call(app(), Method::GET, "/api/book/search/priceMoreThen?price=-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"price-filter": "Price must be a non-negative number"}));

        let (_, body) = call(app(), Method::GET, "/api/book/search/inColor", None).await;
        assert_eq!(body[0]["title"], "The Hobbit");
    }

    #[tokio::test]
    async fn orders() {
        let (_, body) = call(app(), Method::GET, "/api/book/order?direction=asc&column=price", None).await;
        assert_eq!(body[0]["title"], "Harry Potter");

        let (_, body) = call(app(), Method::GET, "/api/book/order?direction=oops&column=price", None).await;
        assert_eq!(body[0]["title"], "The Hobbit");

        let (status, body) = call(app(), Method::GET, "/api/book/order?direction=asc&column=author", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"column": "Invalid column order"}));
    }

    #[tokio::test]
    async fn removes() {
        let (status, body) = call(app(), Method::DELETE, "/api/book/remove/Harry%20Potter", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Harry Potter");

        let (status, body) = call(app(), Method::DELETE, "/api/book/remove/Dune", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"title": "Book with given title does not exist"}));

        let (status, body) = call(app(), Method::DELETE, "/api/book/removeById/0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"id": "Book with id 0 does not exist."}));
    }
}
