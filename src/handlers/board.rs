use actix_web::{
    error::UrlencodedError,
    http::header::{self, ContentType},
    web, HttpRequest, HttpResponse,
};

use crate::{
    errors::ServerError,
    models::command::{Applied, BoardForm, Command},
    session::{Session, SessionKeys},
    store::NoteStore,
    view::View,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(show))
            .route(web::post().to(submit)),
    );
}

pub async fn show(
    session: Session,
    store: web::Data<dyn NoteStore>,
    view: web::Data<View>,
    keys: web::Data<SessionKeys>,
) -> Result<HttpResponse, ServerError> {
    render(&session, store, &view, &keys).await
}

pub async fn submit(
    req: HttpRequest,
    form: Result<web::Form<BoardForm>, actix_web::Error>,
    session: Session,
    store: web::Data<dyn NoteStore>,
    view: web::Data<View>,
    keys: web::Data<SessionKeys>,
) -> Result<HttpResponse, ServerError> {
    // an unreadable body carries no token and is rejected like one
    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e)
            if matches!(
                e.as_error::<UrlencodedError>(),
                Some(UrlencodedError::Overflow { .. })
            ) =>
        {
            log::debug!("board form rejected: {e}");
            return Err(ServerError::PayloadTooLarge);
        }
        Err(e) => {
            log::debug!("unreadable board form: {e}");
            BoardForm::default()
        }
    };
    session.verify(form.csrf.as_deref())?;

    let command = match Command::from_form(&form)? {
        Some(command) => command,
        None => return render(&session, store, &view, &keys).await,
    };

    let store = store.into_inner();
    let applied = web::block(move || command.apply(store.as_ref())).await??;

    Ok(match applied {
        Applied::Created(note) => {
            log::info!("created note {}", note.id);
            back_to_board(&req)
        }
        Applied::Updated { id, found } => {
            log_write("updated", id, found);
            back_to_board(&req)
        }
        Applied::Deleted { id, found } => {
            log_write("deleted", id, found);
            back_to_board(&req)
        }
        Applied::Moved {
            id,
            position,
            found: true,
        } => {
            log::info!("moved note {} to ({}, {})", id, position.x, position.y);
            HttpResponse::Ok().finish()
        }
        Applied::Moved { id, .. } => {
            log::debug!("move for missing note {id}");
            HttpResponse::NotFound().finish()
        }
    })
}

async fn render(
    session: &Session,
    store: web::Data<dyn NoteStore>,
    view: &View,
    keys: &SessionKeys,
) -> Result<HttpResponse, ServerError> {
    let store = store.into_inner();
    let notes = web::block(move || store.list()).await??;
    let page = view.board(&notes, session.csrf())?;

    let mut response = HttpResponse::Ok();
    response.content_type(ContentType::html());
    if session.is_fresh() {
        response.cookie(session.cookie(keys)?);
    }
    Ok(response.body(page))
}

fn back_to_board(req: &HttpRequest) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, req.path().to_owned()))
        .finish()
}

fn log_write(verb: &str, id: i32, found: bool) {
    if found {
        log::info!("{verb} note {id}");
    } else {
        log::debug!("{verb} nothing, note {id} does not exist");
    }
}
