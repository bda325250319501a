pub mod shared {
    pub mod core {
        pub mod errors;
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod remote_store;
    }
}

pub mod modules {
    pub mod collections {
        pub mod controller;
        pub mod core {
            pub mod entities;
            pub mod item;
            pub mod state;
            pub mod status;
        }
        pub mod use_cases {
            pub mod load_collection {
                pub mod handler;
            }
            pub mod mutate_item {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
            }
            pub mod create_item {
                pub mod handler;
            }
        }
    }
    pub mod device_search {
        pub mod controller;
        pub mod core {
            pub mod schema;
            pub mod scope;
            pub mod state;
            pub mod view_record;
        }
        pub mod use_cases {
            pub mod search_devices {
                pub mod handler;
            }
            pub mod annotate_results {
                pub mod handler;
            }
        }
    }
}

pub mod shell;
