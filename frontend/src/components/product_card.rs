use crate::config::CONFIG;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use catalog_shared::Product;
use catalog_shared::image::proxied_image_url;
use leptos::prelude::*;

#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let image = proxied_image_url(CONFIG.image_proxy_base, product.primary_image());
    let category = product.category_name().map(str::to_string);
    let price = product.display_price();
    let target = AppRoute::ProductDetails {
        slug: product.detail_key().to_string(),
    };
    let Product {
        name, description, ..
    } = product;

    view! {
        <Link to=target class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow">
            <figure class="h-48 bg-base-200">
                <img src=image alt=name.clone() class="h-full w-full object-cover" loading="lazy" />
            </figure>
            <div class="card-body p-4">
                <h2 class="card-title text-base">{name}</h2>
                <p class="text-sm text-base-content/70 line-clamp-2">{description}</p>
                <div class="card-actions justify-between items-center mt-2">
                    <span class="font-bold text-primary">{price}</span>
                    {category.map(|c| view! { <span class="badge badge-outline">{c}</span> })}
                </div>
            </div>
        </Link>
    }
}
