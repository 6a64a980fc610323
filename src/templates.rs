use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::movie,
    flash::{Flash, FlashLevel},
    models::{RankedMovie, TmdbMovie},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(movies: &[RankedMovie], flash: Option<&Flash>) -> String {
    page(
        "My Top Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    (flash_banner(flash))

                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                            p class="mt-2 text-gray-600" { "Ranked by your rating." }
                        }
                        a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                    }

                    @if movies.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies yet. Add one to get started." }
                        }
                    } @else {
                        div class="mt-10 space-y-4" {
                            @for entry in movies {
                                (movie_card(entry))
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn add_page(flash: Option<&Flash>) -> String {
    page(
        "Add Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    (flash_banner(flash))

                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Add Movie" }
                        p class="mt-2 text-gray-600" { "Search the movie database by title." }

                        form class="mt-8 space-y-6" method="post" action="/add" {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="title" { "Movie Title" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="title" id="title" required;
                            }

                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Add Movie" }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                    }
                }
            }
        },
    )
}

pub fn select_page(candidates: &[TmdbMovie]) -> String {
    page(
        "Select Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                    p class="mt-2 text-gray-600" { "Pick the title you meant." }

                    div class="mt-8 space-y-3" {
                        @for candidate in candidates {
                            a class="block bg-white shadow rounded-lg p-5 hover:bg-gray-100" href=(format!("/find?id={}", candidate.tmdb_id)) {
                                span class="font-semibold text-gray-900" { (candidate.title) }
                                @if let Some(year) = candidate.release_year() {
                                    span class="ml-2 text-gray-500" { "(" (year) ")" }
                                }
                                p class="mt-1 text-sm text-gray-600 line-clamp-2" { (candidate.overview) }
                            }
                        }
                    }

                    a class="mt-8 inline-block text-sm text-blue-600 hover:text-blue-800" href="/add" { "Search again" }
                }
            }
        },
    )
}

pub fn edit_page(
    movie: &movie::Model,
    title: &str,
    imdb_rating: Option<&str>,
    rotten_rating: Option<&str>,
    flash: Option<&Flash>,
) -> String {
    let action = format!("/edit?id={}&title={}", movie.id, urlencoding::encode(title));

    page(
        "Rate Movie",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    (flash_banner(flash))

                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" {
                            (movie.title)
                            @if let Some(year) = movie.year {
                                span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                            }
                        }
                        p class="mt-2 text-gray-600" { (movie.description) }

                        p class="mt-4 text-sm text-gray-500" {
                            "IMDb: " (imdb_rating.unwrap_or("unavailable"))
                            " · Rotten Tomatoes: " (rotten_rating.unwrap_or("unavailable"))
                        }

                        form class="mt-8 space-y-6" method="post" action=(action) {
                            div {
                                label class="block text-sm font-medium text-gray-700" for="rating" { "Your Rating Out of 10 e.g. 7.5" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="rating" id="rating" value=[movie.rating.as_deref()] required;
                            }

                            div {
                                label class="block text-sm font-medium text-gray-700" for="review" { "Your Review" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="review" id="review" value=[movie.review.as_deref()] required;
                            }

                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Done" }
                        }

                        a class="mt-6 inline-block text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to list" }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn flash_banner(flash: Option<&Flash>) -> Markup {
    let Some(flash) = flash else {
        return html! {};
    };

    let classes = match flash.level {
        FlashLevel::Error => "mb-6 rounded-md border border-red-300 bg-red-50 px-4 py-3 text-red-800",
        FlashLevel::Warning => {
            "mb-6 rounded-md border border-yellow-300 bg-yellow-50 px-4 py-3 text-yellow-800"
        },
    };

    html! {
        div class=(classes) { (flash.message) }
    }
}

fn movie_card(entry: &RankedMovie) -> Markup {
    let movie = &entry.movie;

    html! {
        div class="bg-white shadow rounded-lg p-6" {
            div class="flex items-start gap-5" {
                @if let Some(image_url) = &movie.image_url {
                    img class="w-20 rounded-md shadow" src=(image_url) alt=(movie.title);
                } @else {
                    div class="w-20 h-28 rounded-md bg-gray-200" {}
                }

                div class="flex-1" {
                    div class="flex items-start justify-between gap-4" {
                        h2 class="text-xl font-semibold text-gray-900" {
                            (movie.title)
                            @if let Some(year) = movie.year {
                                span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                            }
                        }
                        span class="rounded-full bg-blue-100 px-3 py-1 text-sm font-semibold text-blue-800" { "#" (entry.ranking) }
                    }

                    p class="mt-1 text-sm text-gray-700" {
                        @if let Some(rating) = &movie.rating {
                            span class="font-medium" { (rating) " / 10" }
                        } @else {
                            span class="text-gray-500" { "Not rated yet" }
                        }
                        @if let Some(imdb) = &movie.imdb_rating {
                            span class="ml-3 text-gray-500" { "IMDb " (imdb) }
                        }
                        @if let Some(rotten) = &movie.rotten_rating {
                            span class="ml-3 text-gray-500" { "RT " (rotten) }
                        }
                    }

                    @if let Some(review) = &movie.review {
                        p class="mt-2 text-sm text-gray-600" { (review) }
                    }

                    div class="mt-3 space-x-4 text-sm" {
                        a class="text-blue-600 hover:text-blue-800" href=(format!("/edit?id={}&title={}", movie.id, urlencoding::encode(&movie.title))) { "Edit" }
                        a class="text-red-600 hover:text-red-800" href=(format!("/delete?id={}", movie.id)) { "Delete" }
                    }
                }
            }
        }
    }
}
