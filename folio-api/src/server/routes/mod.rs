use crate::server::ServerRouter;

mod images;

pub fn routes() -> ServerRouter {
    ServerRouter::new().merge(images::routes())
}
