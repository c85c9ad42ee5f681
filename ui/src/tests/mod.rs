mod view_keys;
