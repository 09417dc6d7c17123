//! Fixed datasets shown when the remote content sources cannot be reached.

use crate::model::{
    Id,
    image::{Image, ImageMarker},
    post::{Post, PostMarker},
};
use time::macros::datetime;

#[must_use]
pub fn posts() -> Vec<Post> {
    vec![
        Post {
            id: Id::new(1),
            title: "Getting Started with React".into(),
            content: "<p>This is a placeholder content for the React tutorial. In this post, \
                we'll cover the basics of React, including components, state, and props.</p>\
                <h2>What is React?</h2><p>React is a JavaScript library for building user \
                interfaces. It allows you to create reusable UI components and manage the state \
                of your application efficiently.</p><h2>Key Concepts</h2><ul><li>Components</li>\
                <li>JSX</li><li>State and Props</li><li>Hooks</li></ul><p>Stay tuned for more \
                in-depth React tutorials!</p>"
                .into(),
            excerpt: "Learn the basics of React in this comprehensive guide.".into(),
            published_at: Some(datetime!(2023-04-01 10:00:00 UTC)),
            author: "John Doe".into(),
            category: "Frontend".into(),
            tags: vec!["React".into(), "JavaScript".into()],
            image_url: "/placeholder-image.jpg".into(),
        },
        Post {
            id: Id::new(2),
            title: "Introduction to Node.js".into(),
            content: "<p>This is a placeholder content for the Node.js tutorial. In this post, \
                we'll introduce you to Node.js and its core concepts.</p><h2>What is Node.js?</h2>\
                <p>Node.js is a JavaScript runtime built on Chrome's V8 JavaScript engine. It \
                allows you to run JavaScript on the server-side.</p><h2>Key Features</h2><ul>\
                <li>Asynchronous I/O</li><li>Event-driven architecture</li><li>NPM (Node Package \
                Manager)</li><li>Built-in modules</li></ul><p>Stay tuned for more in-depth \
                Node.js tutorials!</p>"
                .into(),
            excerpt: "Discover the power of server-side JavaScript with Node.js.".into(),
            published_at: Some(datetime!(2023-04-15 14:30:00 UTC)),
            author: "Jane Smith".into(),
            category: "Backend".into(),
            tags: vec!["Node.js".into(), "JavaScript".into(), "Backend".into()],
            image_url: "/placeholder-image-2.jpg".into(),
        },
    ]
}

/// The placeholder post with the given id, if there is one.
#[must_use]
pub fn post(id: Id<PostMarker>) -> Option<Post> {
    posts().into_iter().find(|post| post.id == id)
}

#[must_use]
pub fn images() -> Vec<Image> {
    [
        (1, "web-development-workspace", "web", "Web Development Workspace"),
        (2, "creative-design-process", "graphic", "Creative Design Process"),
        (3, "mobile-app-interface-design", "ui", "Mobile App Interface Design"),
        (4, "ecommerce-website", "web", "E-commerce Website"),
        (5, "brand-identity-design", "graphic", "Brand Identity Design"),
    ]
    .into_iter()
    .map(|(id, file, category, title)| Image {
        id: Id::new(id),
        src: format!("/images/{file}.jpg"),
        category: category.into(),
        title: title.into(),
    })
    .collect()
}

#[must_use]
pub fn image(id: Id<ImageMarker>) -> Option<Image> {
    images().into_iter().find(|image| image.id == id)
}

#[cfg(test)]
mod tests {
    use crate::{model::Id, placeholder};

    #[test]
    fn two_posts_in_order() {
        let posts = placeholder::posts();
        let titles: Vec<&str> = posts.iter().map(|post| post.title.as_str()).collect();
        assert_eq!(titles, ["Getting Started with React", "Introduction to Node.js"]);
        assert!(posts[1].content.contains("<li>NPM (Node Package Manager)</li>"));
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(placeholder::post(Id::new(2)).unwrap().author, "Jane Smith");
        assert!(placeholder::post(Id::new(3)).is_none());
        assert_eq!(placeholder::image(Id::new(3)).unwrap().category, "ui");
        assert!(placeholder::image(Id::new(0)).is_none());
    }
}
