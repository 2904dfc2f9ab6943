use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use client::{
    app::Flow,
    command::Command,
    errors::ClientError,
    prompt::mock::ScriptedPrompter,
    state::EditState,
    CatalogApi, CatalogApp, ProductForm,
};
use models::product::{ProductDocument, ProductDraft, ProductId};
use service::{
    errors::ServiceError,
    product::{repository::memory::InMemoryProductRepository, ProductRepository},
};
use tokio::net::TcpListener;

use server::{routes, state::ServerState};

/// Lists fine until the first replace, then every list fails.
#[derive(Default)]
struct ListFailsAfterReplace {
    inner: InMemoryProductRepository,
    replaced: AtomicBool,
}

#[async_trait]
impl ProductRepository for ListFailsAfterReplace {
    async fn list(&self) -> Result<Vec<ProductDocument>, ServiceError> {
        if self.replaced.load(Ordering::SeqCst) {
            return Err(ServiceError::Db("list unavailable".into()));
        }
        self.inner.list().await
    }
    async fn get(&self, id: ProductId) -> Result<Option<ProductDocument>, ServiceError> {
        self.inner.get(id).await
    }
    async fn insert(&self, draft: ProductDraft) -> Result<ProductDocument, ServiceError> {
        self.inner.insert(draft).await
    }
    async fn replace(&self, doc: ProductDocument) -> Result<Option<ProductDocument>, ServiceError> {
        let res = self.inner.replace(doc).await;
        self.replaced.store(true, Ordering::SeqCst);
        res
    }
    async fn delete(&self, id: ProductId) -> Result<bool, ServiceError> {
        self.inner.delete(id).await
    }
    async fn delete_all(&self) -> Result<u64, ServiceError> {
        self.inner.delete_all().await
    }
}

async fn start_server() -> anyhow::Result<String> {
    serve(Arc::new(InMemoryProductRepository::new())).await
}

async fn serve(repo: Arc<dyn ProductRepository>) -> anyhow::Result<String> {
    let state = ServerState::new(repo);
    let app = routes::build_router(state, routes::build_cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(format!("http://{}", addr))
}

async fn app_with(answers: Vec<bool>) -> anyhow::Result<CatalogApp<ScriptedPrompter>> {
    let base = start_server().await?;
    let mut app = CatalogApp::new(CatalogApi::new(base)?, ScriptedPrompter::answering(answers));
    app.refresh().await?;
    Ok(app)
}

fn names(app: &CatalogApp<ScriptedPrompter>) -> Vec<String> {
    app.state().products().iter().map(|p| p.name.clone()).collect()
}

#[tokio::test]
async fn create_update_delete_through_the_page() -> anyhow::Result<()> {
    // one confirmation for the delete
    let mut app = app_with(vec![true]).await?;
    assert!(app.render().contains("No products available in the store yet."));

    app.create(ProductForm::new("Zebra", "", "3")).await?;
    app.create(ProductForm::new("Apple", "red", "1")).await?;
    let pen = app.create(ProductForm::new("Pen", "", "1.5")).await?;
    assert_eq!(app.prompter().last_notification(), Some("New product created successfully!"));
    assert_eq!(names(&app), vec!["Apple", "Pen", "Zebra"]);

    // row 2 (zero-based 1) is the pen
    app.open_edit(1)?;
    assert!(matches!(app.state().edit_state(), EditState::Open { position: 1, .. }));
    let updated = app.submit_edit(ProductForm::new("Pen", "blue", "2.0")).await?;
    assert_eq!(updated.id, pen.id);
    assert_eq!(updated.description.as_deref(), Some("blue"));
    assert_eq!(app.state().edit_state(), &EditState::Closed);
    assert_eq!(app.state().product_at(1)?.price, 2.0);

    assert!(app.delete(1).await?);
    assert_eq!(app.prompter().questions.last().map(String::as_str), Some("Are you sure you want to delete product 'Pen'?"));
    assert_eq!(names(&app), vec!["Apple", "Zebra"]);
    Ok(())
}

#[tokio::test]
async fn failed_create_leaves_state_untouched() -> anyhow::Result<()> {
    let mut app = app_with(vec![]).await?;
    app.create(ProductForm::new("Cup", "", "2")).await?;

    let err = app.create(ProductForm::new("", "", "2")).await;
    assert!(matches!(err, Err(ClientError::Status(s)) if s.as_u16() == 400));
    assert_eq!(app.prompter().last_notification(), Some("Error! New product not created!"));

    let err = app.create(ProductForm::new("Mug", "", "free")).await;
    assert!(err.is_err());
    assert_eq!(names(&app), vec!["Cup"]);
    Ok(())
}

#[tokio::test]
async fn declined_confirmations_do_nothing() -> anyhow::Result<()> {
    let mut app = app_with(vec![false, false]).await?;
    app.create(ProductForm::new("Cup", "", "2")).await?;

    assert!(!app.delete(0).await?);
    assert!(!app.delete_all().await?);
    assert_eq!(names(&app), vec!["Cup"]);
    Ok(())
}

#[tokio::test]
async fn delete_all_through_commands() -> anyhow::Result<()> {
    let mut app = app_with(vec![true]).await?;
    for line in ["add A | | 1", "add B | x | 2"] {
        assert_eq!(app.dispatch(line.parse::<Command>()?).await, Flow::Continue);
    }
    assert_eq!(app.state().products().len(), 2);

    app.dispatch("clear".parse::<Command>()?).await;
    assert!(app.state().is_empty());
    assert_eq!(app.prompter().last_notification(), Some("All products deleted!"));
    assert_eq!(app.dispatch(Command::Quit).await, Flow::Quit);
    Ok(())
}

#[tokio::test]
async fn stale_rows_and_missing_forms_are_reported() -> anyhow::Result<()> {
    let mut app = app_with(vec![]).await?;
    assert!(matches!(app.open_edit(0), Err(ClientError::NoSuchProduct(0))));
    assert_eq!(app.prompter().last_notification(), Some("No such product!"));

    assert!(matches!(app.delete(3).await, Err(ClientError::NoSuchProduct(3))));
    assert!(matches!(
        app.submit_edit(ProductForm::new("x", "", "1")).await,
        Err(ClientError::NoOpenForm)
    ));
    Ok(())
}

#[tokio::test]
async fn update_of_a_vanished_product_keeps_the_form_open() -> anyhow::Result<()> {
    let base = start_server().await?;
    let mut app = CatalogApp::new(CatalogApi::new(base.clone())?, ScriptedPrompter::default());
    app.create(ProductForm::new("Pen", "", "1")).await?;
    app.open_edit(0)?;

    // removed behind the page's back
    CatalogApi::new(base)?.delete_all().await?;

    let err = app.submit_edit(ProductForm::new("Pen", "", "2")).await;
    assert!(matches!(err, Err(ClientError::Status(s)) if s.as_u16() == 404));
    assert_eq!(app.prompter().last_notification(), Some("Error! Product not updated!"));
    assert!(app.state().edit_form().is_some());
    Ok(())
}

#[tokio::test]
async fn unreachable_service_offers_reload_until_declined() -> anyhow::Result<()> {
    // grab a free port, then close it
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let mut app = CatalogApp::new(
        CatalogApi::new(format!("http://{}", addr))?,
        ScriptedPrompter::answering([true, false]),
    );
    let err = app.refresh().await;
    assert!(matches!(err, Err(ClientError::Network(_))));
    assert_eq!(app.prompter().questions, vec!["Could not load data! Reload?"; 2]);
    Ok(())
}

#[tokio::test]
async fn successful_update_closes_the_form_even_if_reload_fails() -> anyhow::Result<()> {
    let base = serve(Arc::new(ListFailsAfterReplace::default())).await?;
    // decline the reload offered after the update
    let mut app = CatalogApp::new(CatalogApi::new(base)?, ScriptedPrompter::answering([false]));
    app.create(ProductForm::new("Pen", "", "1")).await?;
    app.open_edit(0)?;

    let updated = app.submit_edit(ProductForm::new("Pen", "blue", "2")).await?;
    assert_eq!(updated.price, 2.0);
    assert_eq!(app.prompter().questions, vec!["Could not load data! Reload?"]);
    assert_eq!(app.prompter().last_notification(), Some("Product updated successfully!"));
    assert_eq!(app.state().edit_state(), &EditState::Closed);
    Ok(())
}

#[tokio::test]
async fn bare_save_submits_the_prefilled_values() -> anyhow::Result<()> {
    let mut app = app_with(vec![]).await?;
    let pen = app.create(ProductForm::new("Pen", "blue ink", "1.5")).await?;
    app.dispatch("edit 1".parse::<Command>()?).await;

    assert_eq!(app.dispatch("save".parse::<Command>()?).await, Flow::Continue);
    assert_eq!(app.prompter().last_notification(), Some("Product updated successfully!"));
    assert_eq!(app.state().edit_state(), &EditState::Closed);
    assert_eq!(app.state().products(), &[pen][..]);

    // nothing open any more
    assert!(matches!(app.submit_prefilled().await, Err(ClientError::NoOpenForm)));
    Ok(())
}
