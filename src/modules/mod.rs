pub mod identity {
    pub mod model;
    pub mod session;
    pub mod resolver;
    pub mod handle;
    pub mod route;
}
pub mod user {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}
pub mod friend {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}
pub mod group {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}
pub mod game {
    pub mod schema;
    pub mod repository_pg;
}
pub mod user_game {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}
pub mod game_review {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}
pub mod game_profile {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod handle;
    pub mod service;
    pub mod route;
}
pub mod catalog {
    pub mod model;
    pub mod cache;
    pub mod source;
    pub mod client;
    pub mod handle;
    pub mod service;
    pub mod route;
}
pub mod oauth {
    pub mod model;
    pub mod provider;
    pub mod google;
    pub mod handle;
    pub mod service;
    pub mod route;
}
pub mod page {
    pub mod model;
    pub mod handle;
    pub mod route;
}
